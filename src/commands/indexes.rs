//! Indexes command - Creates MongoDB indexes.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the indexes command
pub async fn execute(config: Config) -> AppResult<()> {
    tracing::info!("Ensuring database indexes...");

    let db = Database::try_connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    db.ensure_indexes()
        .await
        .map_err(|e| AppError::internal(e.to_string()))?;

    tracing::info!("Indexes created successfully");
    Ok(())
}
