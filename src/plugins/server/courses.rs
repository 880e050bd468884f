use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use super::PageQuery;
use crate::access::{self, Action, Deny};
use crate::auth::Auth;
use crate::entity::course;
use crate::prelude::*;
use crate::state::AppState;
use crate::sv::Page;
use crate::sv::course::{CourseDraft, CoursePatch};
use crate::{notify, sv};

fn deny(deny: Deny) -> Error {
  match deny {
    Deny::Hidden => Error::CourseNotFound,
    Deny::Forbidden => Error::PermissionDenied,
  }
}

pub async fn list(
  State(app): State<Arc<AppState>>,
  Auth(actor): Auth,
  Query(query): Query<PageQuery>,
) -> Result<Json<Page<course::Model>>> {
  let page = app.sv().course.page(&actor, query.page(), query.size()).await?;
  Ok(Json(page))
}

pub async fn create(
  State(app): State<Arc<AppState>>,
  Auth(actor): Auth,
  Json(draft): Json<CourseDraft>,
) -> Result<(StatusCode, Json<course::Model>)> {
  let course = app.sv().course.create(actor.id, draft).await?;
  Ok((StatusCode::CREATED, Json(course)))
}

pub async fn retrieve(
  State(app): State<Arc<AppState>>,
  Auth(actor): Auth,
  Path(id): Path<i32>,
) -> Result<Json<course::Model>> {
  let course = app.sv().course.by_id(id).await?.ok_or(Error::CourseNotFound)?;
  access::check(&actor, course.owner_id, Action::Read).map_err(deny)?;

  Ok(Json(course))
}

pub async fn update(
  State(app): State<Arc<AppState>>,
  Auth(actor): Auth,
  Path(id): Path<i32>,
  Json(patch): Json<CoursePatch>,
) -> Result<Json<course::Model>> {
  let course = app.sv().course.by_id(id).await?.ok_or(Error::CourseNotFound)?;
  access::check(&actor, course.owner_id, Action::Update).map_err(deny)?;

  let course = app.sv().course.update(course, patch).await?;

  // subscribers hear about it off the request path
  notify::dispatch(app.clone(), course.id);

  Ok(Json(course))
}

pub async fn remove(
  State(app): State<Arc<AppState>>,
  Auth(actor): Auth,
  Path(id): Path<i32>,
) -> Result<StatusCode> {
  let course = app.sv().course.by_id(id).await?.ok_or(Error::CourseNotFound)?;
  access::check(&actor, course.owner_id, Action::Delete).map_err(deny)?;

  app.sv().course.delete(course).await?;

  Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ToggleReq {
  pub course_id: Option<i32>,
}

pub async fn toggle_subscription(
  State(app): State<Arc<AppState>>,
  Auth(actor): Auth,
  Json(req): Json<ToggleReq>,
) -> Result<Json<json::Value>> {
  let course_id = req.course_id.ok_or_else(|| Error::invalid("course_id is required"))?;

  let toggle: sv::subscription::Toggle =
    app.sv().subscription.toggle(actor.id, course_id).await?;

  Ok(Json(json::json!({
    "success": true,
    "message": toggle.as_str(),
  })))
}
