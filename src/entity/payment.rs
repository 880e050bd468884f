//! Payment entity - append-only record of a checkout
//!
//! Rows are created by the payment bridge and never mutated; user and
//! course references are nulled when the referent is deleted.

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
  Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
  #[sea_orm(string_value = "cash")]
  Cash,
  #[sea_orm(string_value = "transfer")]
  Transfer,
  #[sea_orm(string_value = "stripe")]
  Stripe,
}

impl Default for PaymentMethod {
  fn default() -> Self {
    Self::Stripe
  }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub user_id: Option<i32>,
  pub course_id: Option<i32>,
  pub amount: i64,
  pub method: PaymentMethod,
  pub paid_at: NaiveDateTime,
  pub session_id: Option<String>,
  pub link: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::UserId",
    to = "super::user::Column::Id",
    on_delete = "SetNull"
  )]
  User,
  #[sea_orm(
    belongs_to = "super::course::Entity",
    from = "Column::CourseId",
    to = "super::course::Column::Id",
    on_delete = "SetNull"
  )]
  Course,
}

impl Related<super::user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::User.def()
  }
}

impl Related<super::course::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Course.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
