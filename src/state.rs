use std::env;
use std::sync::Arc;

use migration::Migrator;

use crate::mail::Mailer;
use crate::prelude::*;
use crate::stripe::Stripe;
use crate::sv;

#[derive(Debug, Clone)]
pub struct Config {
  pub port: u16,
  pub jwt_secret: String,
  pub token_ttl_hours: i64,
  pub stale_after: TimeDelta,
  pub sweep_interval: Duration,
  pub success_url: String,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      port: 3000,
      jwt_secret: String::new(),
      token_ttl_hours: 24,
      stale_after: TimeDelta::days(30),
      sweep_interval: Duration::from_secs(24 * 3600),
      success_url: String::from("http://127.0.0.1:8000/"),
    }
  }
}

impl Config {
  pub fn from_env() -> Self {
    let mut config = Self::default();

    config.jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET not set");

    if let Ok(port) = env::var("PORT")
      && let Ok(port) = port.parse()
    {
      config.port = port;
    }
    if let Ok(days) = env::var("STALE_AFTER_DAYS")
      && let Ok(days) = days.parse()
    {
      config.stale_after = TimeDelta::days(days);
    }
    if let Ok(interval) = env::var("SWEEP_INTERVAL")
      && let Ok(interval) = humantime::parse_duration(&interval)
    {
      config.sweep_interval = interval;
    }
    if let Ok(url) = env::var("PAYMENT_SUCCESS_URL") {
      config.success_url = url;
    }

    config
  }
}

pub struct Services<'a> {
  pub user: sv::User<'a>,
  pub course: sv::Course<'a>,
  pub lesson: sv::Lesson<'a>,
  pub subscription: sv::Subscription<'a>,
  pub payment: sv::Payment<'a>,
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub mailer: Arc<dyn Mailer>,
  pub payments: Stripe,
  pub config: Config,
}

impl AppState {
  pub async fn new(
    db_url: &str,
    mailer: Arc<dyn Mailer>,
    payments: Stripe,
    config: Config,
  ) -> Self {
    info!("Connecting to database...");
    let db = Database::connect(db_url).await.expect("Failed to connect to database");

    info!("Running migrations...");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    Self { db, mailer, payments, config }
  }

  pub fn sv(&self) -> Services<'_> {
    Services {
      user: sv::User::new(&self.db),
      course: sv::Course::new(&self.db),
      lesson: sv::Lesson::new(&self.db),
      subscription: sv::Subscription::new(&self.db),
      payment: sv::Payment::new(&self.db),
    }
  }
}
