//! Periodic deactivation of stale accounts.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time;

use crate::plugins::Plugin;
use crate::prelude::*;
use crate::state::AppState;

pub struct Sweeper;

#[async_trait]
impl Plugin for Sweeper {
  fn name(&self) -> &'static str {
    "stale-account-sweeper"
  }

  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let mut interval = time::interval(app.config.sweep_interval);

    loop {
      interval.tick().await;

      match app.sv().user.deactivate_stale(app.config.stale_after).await {
        Ok(0) => debug!("Sweep: no stale accounts"),
        Ok(count) => info!("Sweep: deactivated {count} stale accounts"),
        Err(err) => error!("Sweep failed: {err}"),
      }
    }
  }
}
