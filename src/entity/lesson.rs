//! Lesson entity - belongs to exactly one course, carries a video reference

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub title: String,
  #[sea_orm(column_type = "Text")]
  pub description: String,
  pub preview_image: Option<String>,
  pub video_url: String,
  pub course_id: i32,
  pub owner_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::course::Entity",
    from = "Column::CourseId",
    to = "super::course::Column::Id",
    on_delete = "Cascade"
  )]
  Course,
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::OwnerId",
    to = "super::user::Column::Id",
    on_delete = "Cascade"
  )]
  Owner,
}

impl Related<super::course::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Course.def()
  }
}

impl Related<super::user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Owner.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
