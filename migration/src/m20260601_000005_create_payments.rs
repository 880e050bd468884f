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
          .table(Payments::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Payments::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Payments::UserId).integer().null())
          .col(ColumnDef::new(Payments::CourseId).integer().null())
          .col(ColumnDef::new(Payments::Amount).big_integer().not_null())
          .col(ColumnDef::new(Payments::Method).string().not_null().default("stripe"))
          .col(ColumnDef::new(Payments::PaidAt).date_time().not_null())
          .col(ColumnDef::new(Payments::SessionId).string().null())
          .col(ColumnDef::new(Payments::Link).string_len(400).null())
          // payment history must survive user/course deletion
          .foreign_key(
            ForeignKey::create()
              .name("fk_payments_user")
              .from(Payments::Table, Payments::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_payments_course")
              .from(Payments::Table, Payments::CourseId)
              .to(Courses::Table, Courses::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_payments_user")
          .table(Payments::Table)
          .col(Payments::UserId)
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_payments_paid_at")
          .table(Payments::Table)
          .col(Payments::PaidAt)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Payments::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Payments {
  Table,
  Id,
  UserId,
  CourseId,
  Amount,
  Method,
  PaidAt,
  SessionId,
  Link,
}
