use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::entity::payment::{self, PaymentMethod};
use crate::prelude::*;

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
  Asc,
  Desc,
}

#[derive(Debug, Default, Deserialize)]
pub struct PaymentFilter {
  pub from: Option<NaiveDate>,
  pub to: Option<NaiveDate>,
  pub course_id: Option<i32>,
  pub method: Option<PaymentMethod>,
  pub order: Option<Order>,
}

pub struct Payment<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Payment<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Records a completed checkout. Rows are append-only.
  pub async fn record(
    &self,
    user_id: i32,
    course_id: i32,
    amount: i64,
    method: PaymentMethod,
    session_id: Option<String>,
    link: Option<String>,
  ) -> Result<payment::Model> {
    if amount <= 0 {
      return Err(Error::invalid("amount must be positive"));
    }

    let payment = payment::ActiveModel {
      user_id: Set(Some(user_id)),
      course_id: Set(Some(course_id)),
      amount: Set(amount),
      method: Set(method),
      paid_at: Set(Utc::now().naive_utc()),
      session_id: Set(session_id),
      link: Set(link),
      ..Default::default()
    };

    Ok(payment.insert(self.db).await?)
  }

  pub async fn list(&self, filter: PaymentFilter) -> Result<Vec<payment::Model>> {
    let mut query = payment::Entity::find();

    if let Some(from) = filter.from {
      query = query.filter(payment::Column::PaidAt.gte(from.and_time(NaiveTime::MIN)));
    }
    if let Some(to) = filter.to {
      // inclusive upper bound: anything before the next midnight
      let end = (to + TimeDelta::days(1)).and_time(NaiveTime::MIN);
      query = query.filter(payment::Column::PaidAt.lt(end));
    }
    if let Some(course_id) = filter.course_id {
      query = query.filter(payment::Column::CourseId.eq(course_id));
    }
    if let Some(method) = filter.method {
      query = query.filter(payment::Column::Method.eq(method));
    }

    query = match filter.order {
      Some(Order::Desc) => query.order_by_desc(payment::Column::PaidAt),
      _ => query.order_by_asc(payment::Column::PaidAt),
    };

    Ok(query.all(self.db).await?)
  }

  pub async fn for_user(&self, user_id: i32) -> Result<Vec<payment::Model>> {
    let payments = payment::Entity::find()
      .filter(payment::Column::UserId.eq(user_id))
      .order_by_asc(payment::Column::PaidAt)
      .all(self.db)
      .await?;

    Ok(payments)
  }
}
