use sea_orm::sea_query::Expr;
use serde::Deserialize;

use crate::auth;
use crate::entity::user::{self, UserRole};
use crate::prelude::*;

#[derive(Debug, Default, Deserialize)]
pub struct ProfilePatch {
  pub username: Option<String>,
  pub phone: Option<String>,
  pub city: Option<String>,
  pub avatar: Option<String>,
}

pub struct User<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> User<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn register(
    &self,
    email: &str,
    username: &str,
    password: &str,
  ) -> Result<user::Model> {
    let email = email.trim();
    if email.is_empty() {
      return Err(Error::invalid("email is required"));
    }
    if !email.contains('@') {
      return Err(Error::invalid("invalid email address"));
    }
    if password.len() < 6 {
      return Err(Error::invalid("password must be at least 6 characters"));
    }

    if self.by_email(email).await?.is_some() {
      return Err(Error::EmailTaken);
    }

    let user = user::ActiveModel {
      email: Set(email.to_string()),
      username: Set(username.to_string()),
      password_hash: Set(auth::hash_password(password)?),
      role: Set(UserRole::Student),
      is_active: Set(true),
      reg_date: Set(Utc::now().naive_utc()),
      ..Default::default()
    };

    Ok(user.insert(self.db).await?)
  }

  /// Checks credentials and stamps `last_login`; the deactivation sweep
  /// keys off that stamp.
  pub async fn login(&self, email: &str, password: &str) -> Result<user::Model> {
    let user = self.by_email(email).await?.ok_or(Error::InvalidCredentials)?;

    if !user.is_active || !auth::verify_password(password, &user.password_hash) {
      return Err(Error::InvalidCredentials);
    }

    let mut active = user::ActiveModel::from(user);
    active.last_login = Set(Some(Utc::now().naive_utc()));

    Ok(active.update(self.db).await?)
  }

  pub async fn by_id(&self, id: i32) -> Result<Option<user::Model>> {
    Ok(user::Entity::find_by_id(id).one(self.db).await?)
  }

  pub async fn by_email(&self, email: &str) -> Result<Option<user::Model>> {
    let user = user::Entity::find()
      .filter(user::Column::Email.eq(email))
      .one(self.db)
      .await?;
    Ok(user)
  }

  pub async fn update_profile(
    &self,
    user: user::Model,
    patch: ProfilePatch,
  ) -> Result<user::Model> {
    let mut active = user::ActiveModel::from(user);

    if let Some(username) = patch.username {
      active.username = Set(username);
    }
    if let Some(phone) = patch.phone {
      active.phone = Set(Some(phone));
    }
    if let Some(city) = patch.city {
      active.city = Set(Some(city));
    }
    if let Some(avatar) = patch.avatar {
      active.avatar = Set(Some(avatar));
    }

    Ok(active.update(self.db).await?)
  }

  /// One bulk update; re-running only touches rows still past the
  /// threshold, so redelivery is harmless.
  pub async fn deactivate_stale(&self, stale_after: TimeDelta) -> Result<u64> {
    let threshold = Utc::now().naive_utc() - stale_after;

    let result = user::Entity::update_many()
      .col_expr(user::Column::IsActive, Expr::value(false))
      .filter(user::Column::LastLogin.lt(threshold))
      .filter(user::Column::IsActive.eq(true))
      .exec(self.db)
      .await?;

    Ok(result.rows_affected)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::testing::{memory_db, seed_user};

  async fn seed_with_last_login(
    db: &DatabaseConnection,
    email: &str,
    days_ago: i64,
    is_active: bool,
  ) -> user::Model {
    let user = seed_user(db, email, UserRole::Student).await;
    let mut active = user::ActiveModel::from(user);
    active.last_login = Set(Some(Utc::now().naive_utc() - TimeDelta::days(days_ago)));
    active.is_active = Set(is_active);
    active.update(db).await.unwrap()
  }

  #[tokio::test]
  async fn register_and_login() {
    let db = memory_db().await;
    let sv = User::new(&db);

    let user = sv.register("alice@example.com", "alice", "secret6").await.unwrap();
    assert_eq!(user.role, UserRole::Student);
    assert!(user.last_login.is_none());

    let logged_in = sv.login("alice@example.com", "secret6").await.unwrap();
    assert!(logged_in.last_login.is_some());

    assert!(matches!(
      sv.login("alice@example.com", "wrong!").await,
      Err(Error::InvalidCredentials)
    ));
  }

  #[tokio::test]
  async fn register_rejects_bad_input() {
    let db = memory_db().await;
    let sv = User::new(&db);

    assert!(matches!(
      sv.register("", "alice", "secret6").await,
      Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
      sv.register("not-an-email", "alice", "secret6").await,
      Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
      sv.register("alice@example.com", "alice", "short").await,
      Err(Error::InvalidArgument(_))
    ));
  }

  #[tokio::test]
  async fn duplicate_email_rejected() {
    let db = memory_db().await;
    let sv = User::new(&db);

    sv.register("bob@example.com", "bob", "secret6").await.unwrap();

    assert!(matches!(
      sv.register("bob@example.com", "robert", "secret7").await,
      Err(Error::EmailTaken)
    ));
  }

  #[tokio::test]
  async fn sweep_deactivates_only_stale_active_users() {
    let db = memory_db().await;
    let sv = User::new(&db);

    let stale = seed_with_last_login(&db, "stale@example.com", 31, true).await;
    let fresh = seed_with_last_login(&db, "fresh@example.com", 29, true).await;
    let gone = seed_with_last_login(&db, "gone@example.com", 45, false).await;
    // never logged in at all: left alone
    let newcomer = seed_user(&db, "new@example.com", UserRole::Student).await;

    let count = sv.deactivate_stale(TimeDelta::days(30)).await.unwrap();
    assert_eq!(count, 1);

    assert!(!sv.by_id(stale.id).await.unwrap().unwrap().is_active);
    assert!(sv.by_id(fresh.id).await.unwrap().unwrap().is_active);
    assert!(!sv.by_id(gone.id).await.unwrap().unwrap().is_active);
    assert!(sv.by_id(newcomer.id).await.unwrap().unwrap().is_active);

    // idempotent: nothing left to deactivate
    let again = sv.deactivate_stale(TimeDelta::days(30)).await.unwrap();
    assert_eq!(again, 0);
  }
}
