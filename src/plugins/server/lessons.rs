use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use super::PageQuery;
use crate::access::{self, Action, Deny};
use crate::auth::Auth;
use crate::entity::lesson;
use crate::prelude::*;
use crate::state::AppState;
use crate::sv::Page;
use crate::sv::lesson::{LessonDraft, LessonPatch};

fn deny(deny: Deny) -> Error {
  match deny {
    Deny::Hidden => Error::LessonNotFound,
    Deny::Forbidden => Error::PermissionDenied,
  }
}

pub async fn list(
  State(app): State<Arc<AppState>>,
  Auth(actor): Auth,
  Query(query): Query<PageQuery>,
) -> Result<Json<Page<lesson::Model>>> {
  let page = app.sv().lesson.page(&actor, query.page(), query.size()).await?;
  Ok(Json(page))
}

pub async fn create(
  State(app): State<Arc<AppState>>,
  Auth(actor): Auth,
  Json(draft): Json<LessonDraft>,
) -> Result<(StatusCode, Json<lesson::Model>)> {
  let lesson = app.sv().lesson.create(actor.id, draft).await?;
  Ok((StatusCode::CREATED, Json(lesson)))
}

pub async fn retrieve(
  State(app): State<Arc<AppState>>,
  Auth(actor): Auth,
  Path(id): Path<i32>,
) -> Result<Json<lesson::Model>> {
  let lesson = app.sv().lesson.by_id(id).await?.ok_or(Error::LessonNotFound)?;
  access::check(&actor, lesson.owner_id, Action::Read).map_err(deny)?;

  Ok(Json(lesson))
}

pub async fn update(
  State(app): State<Arc<AppState>>,
  Auth(actor): Auth,
  Path(id): Path<i32>,
  Json(patch): Json<LessonPatch>,
) -> Result<Json<lesson::Model>> {
  let lesson = app.sv().lesson.by_id(id).await?.ok_or(Error::LessonNotFound)?;
  access::check(&actor, lesson.owner_id, Action::Update).map_err(deny)?;

  let lesson = app.sv().lesson.update(lesson, patch).await?;

  Ok(Json(lesson))
}

pub async fn remove(
  State(app): State<Arc<AppState>>,
  Auth(actor): Auth,
  Path(id): Path<i32>,
) -> Result<StatusCode> {
  let lesson = app.sv().lesson.by_id(id).await?.ok_or(Error::LessonNotFound)?;
  access::check(&actor, lesson.owner_id, Action::Delete).map_err(deny)?;

  app.sv().lesson.delete(lesson).await?;

  Ok(StatusCode::NO_CONTENT)
}
