//! Long-running services registered explicitly from `main`.

pub mod server;
pub mod sweeper;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::state::AppState;

#[async_trait::async_trait]
pub trait Plugin: Send + Sync {
  fn name(&self) -> &'static str {
    std::any::type_name::<Self>()
  }

  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()>;
}

pub struct App {
  plugins: Vec<Arc<dyn Plugin>>,
}

impl App {
  pub fn new() -> Self {
    Self { plugins: Vec::new() }
  }

  pub fn register<P: Plugin + 'static>(mut self, plugin: P) -> Self {
    self.plugins.push(Arc::new(plugin));
    self
  }

  /// Spawns every plugin under a supervisor that restarts it on crash.
  pub async fn run(self, app: Arc<AppState>) {
    for plugin in self.plugins {
      let app = app.clone();

      tokio::spawn(async move {
        let name = plugin.name();
        info!("Service `{name}` initialized");

        loop {
          let app = app.clone();
          let plugin = plugin.clone();

          let handle = tokio::spawn(async move { plugin.start(app).await });

          match handle.await {
            Ok(Ok(())) => warn!("Service `{name}` stopped unexpectedly"),
            Ok(Err(err)) => error!("Service `{name}` crashed: {err:#}"),
            Err(join_err) if join_err.is_cancelled() => {
              info!("Service `{name}` shut down");
              break;
            }
            Err(_) => error!("Service `{name}` panicked"),
          }

          sleep(Duration::from_secs(5)).await;
          info!("Restarting service `{name}`...");
        }
      });
    }
  }
}
