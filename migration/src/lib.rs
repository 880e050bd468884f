pub use sea_orm_migration::prelude::*;

mod m20260601_000001_create_users;
mod m20260601_000002_create_courses;
mod m20260601_000003_create_lessons;
mod m20260601_000004_create_subscriptions;
mod m20260601_000005_create_payments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20260601_000001_create_users::Migration),
      Box::new(m20260601_000002_create_courses::Migration),
      Box::new(m20260601_000003_create_lessons::Migration),
      Box::new(m20260601_000004_create_subscriptions::Migration),
      Box::new(m20260601_000005_create_payments::Migration),
    ]
  }
}
