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
          .table(Subscriptions::Table)
          .if_not_exists()
          .col(ColumnDef::new(Subscriptions::UserId).integer().not_null())
          .col(ColumnDef::new(Subscriptions::CourseId).integer().not_null())
          .col(ColumnDef::new(Subscriptions::SubscribedAt).date_time().not_null())
          // one row per (user, course), enforced by the key itself
          .primary_key(
            Index::create()
              .col(Subscriptions::UserId)
              .col(Subscriptions::CourseId),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_subscriptions_user")
              .from(Subscriptions::Table, Subscriptions::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_subscriptions_course")
              .from(Subscriptions::Table, Subscriptions::CourseId)
              .to(Courses::Table, Courses::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum Subscriptions {
  Table,
  UserId,
  CourseId,
  SubscribedAt,
}
