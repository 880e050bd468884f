//! User entity - email is the login identifier

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Capability set of a user. Moderators get cross-ownership read/update
/// rights; everything else is decided by ownership.
#[derive(
  Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
  #[sea_orm(string_value = "student")]
  Student,
  #[sea_orm(string_value = "moderator")]
  Moderator,
}

impl Default for UserRole {
  fn default() -> Self {
    Self::Student
  }
}

impl UserRole {
  pub fn is_moderator(self) -> bool {
    matches!(self, Self::Moderator)
  }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  #[sea_orm(unique)]
  pub email: String,
  pub username: String,
  #[serde(skip_serializing)]
  pub password_hash: String,
  pub role: UserRole,
  pub phone: Option<String>,
  pub city: Option<String>,
  pub avatar: Option<String>,
  pub is_active: bool,
  pub last_login: Option<NaiveDateTime>,
  pub reg_date: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::course::Entity")]
  Courses,
  #[sea_orm(has_many = "super::lesson::Entity")]
  Lessons,
  #[sea_orm(has_many = "super::subscription::Entity")]
  Subscriptions,
  #[sea_orm(has_many = "super::payment::Entity")]
  Payments,
}

impl Related<super::course::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Courses.def()
  }
}

impl Related<super::lesson::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Lessons.def()
  }
}

impl Related<super::subscription::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Subscriptions.def()
  }
}

impl Related<super::payment::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Payments.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
