pub use std::time::Duration;

pub use anyhow::Context;
pub use chrono::{NaiveDateTime as DateTime, TimeDelta, Utc};
pub use migration::MigratorTrait;
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait,
  ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, Result};
