use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Users::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Users::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
          .col(ColumnDef::new(Users::Username).string().not_null())
          .col(ColumnDef::new(Users::PasswordHash).string().not_null())
          .col(ColumnDef::new(Users::Role).string().not_null().default("student"))
          .col(ColumnDef::new(Users::Phone).string().null())
          .col(ColumnDef::new(Users::City).string().null())
          .col(ColumnDef::new(Users::Avatar).string().null())
          .col(ColumnDef::new(Users::IsActive).boolean().not_null().default(true))
          .col(ColumnDef::new(Users::LastLogin).date_time().null())
          .col(ColumnDef::new(Users::RegDate).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Users {
  Table,
  Id,
  Email,
  Username,
  PasswordHash,
  Role,
  Phone,
  City,
  Avatar,
  IsActive,
  LastLogin,
  RegDate,
}
