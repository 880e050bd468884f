//! Subscription entity - a user's opt-in to course update notifications
//!
//! The (user_id, course_id) pair is the primary key, so the store itself
//! guarantees at most one row per pair.

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub user_id: i32,
  #[sea_orm(primary_key, auto_increment = false)]
  pub course_id: i32,
  pub subscribed_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::UserId",
    to = "super::user::Column::Id",
    on_delete = "Cascade"
  )]
  User,
  #[sea_orm(
    belongs_to = "super::course::Entity",
    from = "Column::CourseId",
    to = "super::course::Column::Id",
    on_delete = "Cascade"
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
