use sea_orm_migration::prelude::*;

use super::{
  m20260601_000001_create_users::Users, m20260601_000002_create_courses::Courses,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Lessons::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Lessons::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Lessons::Title).string().not_null())
          .col(ColumnDef::new(Lessons::Description).text().not_null())
          .col(ColumnDef::new(Lessons::PreviewImage).string().null())
          .col(ColumnDef::new(Lessons::VideoUrl).string().not_null())
          .col(ColumnDef::new(Lessons::CourseId).integer().not_null())
          .col(ColumnDef::new(Lessons::OwnerId).integer().null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_lessons_course")
              .from(Lessons::Table, Lessons::CourseId)
              .to(Courses::Table, Courses::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_lessons_owner")
              .from(Lessons::Table, Lessons::OwnerId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_lessons_course")
          .table(Lessons::Table)
          .col(Lessons::CourseId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Lessons::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Lessons {
  Table,
  Id,
  Title,
  Description,
  PreviewImage,
  VideoUrl,
  CourseId,
  OwnerId,
}
