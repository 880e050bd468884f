//! Course entity - a titled unit of instructional content

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub title: String,
  #[sea_orm(column_type = "Text")]
  pub description: String,
  pub preview_image: Option<String>,
  pub owner_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::OwnerId",
    to = "super::user::Column::Id",
    on_delete = "Cascade"
  )]
  Owner,
  #[sea_orm(has_many = "super::lesson::Entity")]
  Lessons,
  #[sea_orm(has_many = "super::subscription::Entity")]
  Subscriptions,
}

impl Related<super::user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Owner.def()
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

impl ActiveModelBehavior for ActiveModel {}
