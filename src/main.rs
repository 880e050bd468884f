//! Campus - learning management backend
//!
//! Architecture:
//! - SeaORM for database access (SQLite)
//! - Axum for the HTTP API with rate limiting
//! - Background plugins for update notifications and stale-account sweeps
//! - Tokio for async runtime

mod access;
mod auth;
mod entity;
mod error;
mod mail;
mod notify;
mod plugins;
mod prelude;
mod state;
mod stripe;
mod sv;

use std::env;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::mail::{Mailer, Smtp};
use crate::prelude::*;
use crate::state::{AppState, Config};
use crate::stripe::Stripe;

#[tokio::main]
async fn main() {
  dotenvy::dotenv().ok();

  // Initialize tracing
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "campus=debug,tower_http=debug,axum=trace,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  // Load configuration from environment
  let db_url =
    env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:campus.db?mode=rwc".into());
  let config = Config::from_env();

  let smtp_host = env::var("SMTP_HOST").expect("SMTP_HOST not set");
  let smtp_user = env::var("SMTP_USERNAME").expect("SMTP_USERNAME not set");
  let smtp_pass = env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD not set");
  let mail_from = env::var("MAIL_FROM").expect("MAIL_FROM not set");
  let mailer: Arc<dyn Mailer> = Arc::new(
    Smtp::new(&smtp_host, smtp_user, smtp_pass, &mail_from)
      .expect("Failed to build SMTP transport"),
  );

  let stripe_key = env::var("STRIPE_SECRET_KEY").expect("STRIPE_SECRET_KEY not set");
  let payments = Stripe::new(stripe_key, config.success_url.clone());

  info!("Starting Campus v{}", env!("CARGO_PKG_VERSION"));

  // Initialize application state
  let app = Arc::new(AppState::new(&db_url, mailer, payments, config).await);

  plugins::App::new()
    .register(plugins::server::Server)
    .register(plugins::sweeper::Sweeper)
    .run(app)
    .await;

  tokio::signal::ctrl_c().await.expect("Failed to listen for shutdown signal");
  info!("Shutting down");
}
