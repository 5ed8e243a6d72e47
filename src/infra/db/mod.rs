//! Database connection and initialization.

use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection, DbErr};

use crate::config::Config;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
mod sql_client;

#[cfg(any(test, feature = "test-utils"))]
pub use mock::{row, Call, Mock, MockRow, MockSqlClient};
pub use sql_client::SqlClient;

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: Arc<DatabaseConnection>,
}

impl Database {
    /// Open the connection pool.
    ///
    /// Tables are not touched here; see `Services::ensure_schema`.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(config.database_max_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        tracing::info!("Database connected");

        Ok(Self {
            connection: Arc::new(connection),
        })
    }

    /// Connection as the statement-level client the repositories use.
    pub fn client(&self) -> Arc<dyn SqlClient> {
        self.connection.clone()
    }
}
