mod courses;
mod lessons;
mod payments;
mod users;

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_governor::governor::GovernorConfigBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::prelude::*;
use crate::state::AppState;

pub struct Server;

#[async_trait]
impl super::Plugin for Server {
  fn name(&self) -> &'static str {
    "http-server"
  }

  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let governor_conf = Arc::new(
      GovernorConfigBuilder::default()
        .per_second(2)
        .burst_size(100)
        .finish()
        .context("Failed to build rate limiter config")?,
    );

    let limiter = governor_conf.limiter().clone();
    tokio::spawn(async move {
      loop {
        tokio::time::sleep(Duration::from_secs(60)).await;
        limiter.retain_recent();
      }
    });

    let router = Router::new()
      .route("/health", get(health))
      .route("/api/register", post(users::register))
      .route("/api/login", post(users::login))
      .route("/api/profile", get(users::profile).patch(users::update_profile))
      .route("/api/courses", get(courses::list).post(courses::create))
      .route(
        "/api/courses/{id}",
        get(courses::retrieve)
          .put(courses::update)
          .patch(courses::update)
          .delete(courses::remove),
      )
      .route("/api/lessons", get(lessons::list).post(lessons::create))
      .route(
        "/api/lessons/{id}",
        get(lessons::retrieve)
          .put(lessons::update)
          .patch(lessons::update)
          .delete(lessons::remove),
      )
      .route("/api/subscription", post(courses::toggle_subscription))
      .route("/api/payments", get(payments::list))
      .route("/api/payments/checkout", post(payments::checkout))
      .layer(
        ServiceBuilder::new()
          .layer(TraceLayer::new_for_http())
          .layer(GovernorLayer::new(governor_conf))
          .layer(
            CorsLayer::new()
              .allow_origin(Any)
              .allow_methods(Any)
              .allow_headers(Any),
          ),
      )
      .with_state(app.clone())
      .into_make_service_with_connect_info::<SocketAddr>();

    let addr = SocketAddr::from(([0, 0, 0, 0], app.config.port));
    info!("HTTP server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.context("Failed to bind")?;
    axum::serve(listener, router).await.context("Server error")?;

    Ok(())
  }
}

async fn health() -> &'static str {
  "OK"
}

/// Page selector shared by the listing endpoints.
#[derive(Debug, serde::Deserialize)]
pub struct PageQuery {
  pub page: Option<u64>,
  pub page_size: Option<u64>,
}

impl PageQuery {
  pub fn page(&self) -> u64 {
    self.page.unwrap_or(1).max(1)
  }

  pub fn size(&self) -> u64 {
    crate::sv::clamp_page_size(self.page_size)
  }
}
