use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::auth::Auth;
use crate::entity::payment::{self, PaymentMethod};
use crate::prelude::*;
use crate::state::AppState;
use crate::sv::payment::PaymentFilter;

pub async fn list(
  State(app): State<Arc<AppState>>,
  Auth(_actor): Auth,
  Query(filter): Query<PaymentFilter>,
) -> Result<Json<Vec<payment::Model>>> {
  let payments = app.sv().payment.list(filter).await?;
  Ok(Json(payments))
}

#[derive(Debug, Deserialize)]
pub struct CheckoutReq {
  pub course_id: Option<i32>,
  pub amount: Option<i64>,
}

pub async fn checkout(
  State(app): State<Arc<AppState>>,
  Auth(actor): Auth,
  Json(req): Json<CheckoutReq>,
) -> Result<Json<json::Value>> {
  let course_id = req.course_id.ok_or_else(|| Error::invalid("course_id is required"))?;
  let amount = req.amount.ok_or_else(|| Error::invalid("amount is required"))?;
  if amount <= 0 {
    return Err(Error::invalid("amount must be positive"));
  }

  let course = app.sv().course.by_id(course_id).await?.ok_or(Error::CourseNotFound)?;

  let session = app.payments.checkout(&course.title, amount).await?;

  let payment = app
    .sv()
    .payment
    .record(
      actor.id,
      course.id,
      amount,
      PaymentMethod::Stripe,
      Some(session.id.clone()),
      Some(session.url.clone()),
    )
    .await?;

  Ok(Json(json::json!({
    "payment_id": payment.id,
    "session_id": session.id,
    "link": session.url,
  })))
}
