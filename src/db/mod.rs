//! Database module providing connection management, constraint-violation
//! translation, and per-table query helpers.
//!
//! Query helpers are free functions generic over [`sea_orm::ConnectionTrait`]
//! so the same helper runs against the pooled connection or an open
//! transaction. Mutations that must commit atomically with their audit entry
//! take the transaction handle explicitly.

pub mod admin_logs;
pub mod api_keys;
pub mod badges;
pub mod constraint;
pub mod donations;
pub mod instructors;
pub mod stations;
pub mod users;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Open a connection pool against the configured database.
pub async fn connect(config: &Config) -> AppResult<DatabaseConnection> {
    // Fail on unsupported URL schemes before handing anything to sqlx.
    config
        .database_backend()
        .map_err(|e| AppError::Database(e.to_string()))?;

    let mut options = ConnectOptions::new(config.database_url.clone());
    options.max_connections(10).sqlx_logging(false);

    let db = Database::connect(options).await?;
    Ok(db)
}
