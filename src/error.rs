//! Error types for the campus server

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] sea_orm::DbErr),

  #[error("authentication required")]
  Unauthenticated,

  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("permission denied")]
  PermissionDenied,

  #[error("course not found")]
  CourseNotFound,

  #[error("lesson not found")]
  LessonNotFound,

  #[error("user not found")]
  UserNotFound,

  #[error("email already registered")]
  EmailTaken,

  #[error("{0}")]
  InvalidArgument(String),

  #[error("payment gateway error: {0}")]
  Payment(#[from] reqwest::Error),

  #[error("internal error: {0}")]
  Internal(String),
}

impl Error {
  pub fn invalid(message: impl Into<String>) -> Self {
    Self::InvalidArgument(message.into())
  }
}

impl From<anyhow::Error> for Error {
  fn from(err: anyhow::Error) -> Self {
    Self::Internal(format!("{err:#}"))
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      Error::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error".into()),
      Error::Unauthenticated => (StatusCode::UNAUTHORIZED, "Authentication required".into()),
      Error::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials".into()),
      Error::PermissionDenied => (StatusCode::FORBIDDEN, "Permission denied".into()),
      Error::CourseNotFound => (StatusCode::NOT_FOUND, "Course not found".into()),
      Error::LessonNotFound => (StatusCode::NOT_FOUND, "Lesson not found".into()),
      Error::UserNotFound => (StatusCode::NOT_FOUND, "User not found".into()),
      Error::EmailTaken => (StatusCode::CONFLICT, "Email already registered".into()),
      Error::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
      Error::Payment(_) => (StatusCode::BAD_GATEWAY, "Payment gateway error".into()),
      Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into()),
    };

    let body = json::json!({
      "success": false,
      "error": message,
    });

    (status, axum::Json(body)).into_response()
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
