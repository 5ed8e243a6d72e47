//! Schema command - Creates missing tables and exits.

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;
use crate::services::Services;

/// Execute the schema command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;

    Services::from_client(db.client()).ensure_schema().await?;

    Ok(())
}
