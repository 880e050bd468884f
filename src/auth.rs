//! Token auth and password hashing.
//!
//! Stateless bearer tokens (HS256); the extractor resolves the claims back
//! to a live user row, so deactivated accounts lose access as soon as the
//! sweep marks them inactive.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use pbkdf2::Pbkdf2;
use pbkdf2::password_hash::rand_core::OsRng;
use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use serde::{Deserialize, Serialize};

use crate::entity::user;
use crate::prelude::*;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
  pub sub: i32,
  pub email: String,
  pub exp: i64,
}

pub fn issue_token(user: &user::Model, secret: &str, ttl_hours: i64) -> Result<String> {
  let exp = (Utc::now() + TimeDelta::hours(ttl_hours)).timestamp();
  let claims = Claims { sub: user.id, email: user.email.clone(), exp };

  encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
    .map_err(|err| Error::Internal(format!("failed to sign token: {err}")))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims> {
  decode::<Claims>(
    token,
    &DecodingKey::from_secret(secret.as_bytes()),
    &Validation::new(Algorithm::HS256),
  )
  .map(|data| data.claims)
  .map_err(|_| Error::Unauthenticated)
}

pub fn hash_password(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Pbkdf2
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|err| Error::Internal(format!("failed to hash password: {err}")))
}

pub fn verify_password(password: &str, stored: &str) -> bool {
  PasswordHash::new(stored)
    .and_then(|parsed| Pbkdf2.verify_password(password.as_bytes(), &parsed))
    .is_ok()
}

/// Authenticated actor, extracted from the `Authorization: Bearer` header.
pub struct Auth(pub user::Model);

impl FromRequestParts<Arc<AppState>> for Auth {
  type Rejection = Error;

  async fn from_request_parts(parts: &mut Parts, app: &Arc<AppState>) -> Result<Self> {
    let header = parts
      .headers
      .get(AUTHORIZATION)
      .and_then(|value| value.to_str().ok())
      .ok_or(Error::Unauthenticated)?;

    let token = header.strip_prefix("Bearer ").ok_or(Error::Unauthenticated)?;
    let claims = verify_token(token, &app.config.jwt_secret)?;

    let user = app
      .sv()
      .user
      .by_id(claims.sub)
      .await?
      .filter(|user| user.is_active)
      .ok_or(Error::Unauthenticated)?;

    Ok(Auth(user))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::entity::user::UserRole;

  fn sample_user() -> user::Model {
    user::Model {
      id: 7,
      email: "student@example.com".into(),
      username: "student".into(),
      password_hash: String::new(),
      role: UserRole::Student,
      phone: None,
      city: None,
      avatar: None,
      is_active: true,
      last_login: None,
      reg_date: Utc::now().naive_utc(),
    }
  }

  #[test]
  fn token_round_trip() {
    let token = issue_token(&sample_user(), "secret", 24).unwrap();
    let claims = verify_token(&token, "secret").unwrap();

    assert_eq!(claims.sub, 7);
    assert_eq!(claims.email, "student@example.com");
  }

  #[test]
  fn token_rejects_wrong_secret() {
    let token = issue_token(&sample_user(), "secret", 24).unwrap();
    assert!(matches!(verify_token(&token, "other"), Err(Error::Unauthenticated)));
  }

  #[test]
  fn garbage_token_rejected() {
    assert!(matches!(verify_token("not.a.token", "secret"), Err(Error::Unauthenticated)));
  }

  #[test]
  fn password_hash_verifies() {
    let hash = hash_password("hunter42").unwrap();

    assert!(verify_password("hunter42", &hash));
    assert!(!verify_password("hunter43", &hash));
  }
}
