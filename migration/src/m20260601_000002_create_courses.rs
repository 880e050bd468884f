use sea_orm_migration::prelude::*;

use super::m20260601_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Courses::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Courses::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Courses::Title).string().not_null())
          .col(ColumnDef::new(Courses::Description).text().not_null())
          .col(ColumnDef::new(Courses::PreviewImage).string().null())
          .col(ColumnDef::new(Courses::OwnerId).integer().null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_courses_owner")
              .from(Courses::Table, Courses::OwnerId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_courses_owner")
          .table(Courses::Table)
          .col(Courses::OwnerId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Courses::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Courses {
  Table,
  Id,
  Title,
  Description,
  PreviewImage,
  OwnerId,
}
