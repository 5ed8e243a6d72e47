//! Serve command - Starts the HTTP server.

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::Services;

/// Execute the serve command.
///
/// Tables are ensured before binding; a failure there aborts startup.
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    let db = Database::connect(&config).await?;
    let client = db.client();

    let services = Services::from_client(client.clone());
    services.ensure_schema().await?;

    let app = create_router(AppState::from_container(&services, client));

    let addr = bind_addr(&args, &config);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

/// CLI flags win over the environment.
fn bind_addr(args: &ServeArgs, config: &Config) -> String {
    format!(
        "{}:{}",
        args.host.as_deref().unwrap_or(&config.server_host),
        args.port.unwrap_or(config.server_port)
    )
}
