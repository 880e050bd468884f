use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::auth::{self, Auth};
use crate::entity::user::{self, UserRole};
use crate::entity::payment;
use crate::prelude::*;
use crate::state::AppState;
use crate::sv::user::ProfilePatch;

#[derive(Debug, Deserialize)]
pub struct RegisterReq {
  pub email: String,
  pub username: String,
  pub password: String,
}

pub async fn register(
  State(app): State<Arc<AppState>>,
  Json(req): Json<RegisterReq>,
) -> Result<(StatusCode, Json<user::Model>)> {
  let user = app.sv().user.register(&req.email, &req.username, &req.password).await?;
  Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Debug, Deserialize)]
pub struct LoginReq {
  pub email: String,
  pub password: String,
}

pub async fn login(
  State(app): State<Arc<AppState>>,
  Json(req): Json<LoginReq>,
) -> Result<Json<json::Value>> {
  let user = app.sv().user.login(&req.email, &req.password).await?;
  let token = auth::issue_token(&user, &app.config.jwt_secret, app.config.token_ttl_hours)?;

  Ok(Json(json::json!({ "token": token })))
}

#[derive(Debug, Serialize)]
pub struct ProfileRes {
  pub id: i32,
  pub email: String,
  pub username: String,
  pub role: UserRole,
  pub phone: Option<String>,
  pub city: Option<String>,
  pub avatar: Option<String>,
  pub payment_history: Vec<payment::Model>,
}

pub async fn profile(
  State(app): State<Arc<AppState>>,
  Auth(actor): Auth,
) -> Result<Json<ProfileRes>> {
  let payment_history = app.sv().payment.for_user(actor.id).await?;

  Ok(Json(ProfileRes {
    id: actor.id,
    email: actor.email,
    username: actor.username,
    role: actor.role,
    phone: actor.phone,
    city: actor.city,
    avatar: actor.avatar,
    payment_history,
  }))
}

pub async fn update_profile(
  State(app): State<Arc<AppState>>,
  Auth(actor): Auth,
  Json(patch): Json<ProfilePatch>,
) -> Result<Json<user::Model>> {
  let user = app.sv().user.update_profile(actor, patch).await?;
  Ok(Json(user))
}
