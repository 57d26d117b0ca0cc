use anyhow::{Context, Result};
use database::MySqlTaskRepository;
use http_api::TaskApiServer;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;

/// Bootstrap the schema and open the connection pool
///
/// Connectivity failures are retried with backoff according to the
/// configured policy before giving up.
pub async fn create_repository(config: &Config) -> Result<Arc<MySqlTaskRepository>> {
    info!("Creating task repository");
    info!("Using database: {}", config.redacted_database_url());

    let retry = config.retry_policy()?;
    let repo = MySqlTaskRepository::connect(
        &config.connection_settings(),
        &config.pool_settings(),
        retry,
    )
    .await
    .context("Failed to create MySQL repository")?;

    info!("Task repository created successfully");
    Ok(Arc::new(repo))
}

/// Create and configure the HTTP server
pub fn create_server(
    repository: Arc<MySqlTaskRepository>,
    config: &Config,
) -> TaskApiServer<MySqlTaskRepository> {
    info!(static_dir = %config.server.static_dir, "Creating task API server");
    TaskApiServer::new(repository).with_static_dir(&config.server.static_dir)
}

/// Initialize the complete application
///
/// Returns the repository alongside the server so the caller can drain the
/// pool once the server has stopped.
pub async fn initialize_app(
    config: &Config,
) -> Result<(Arc<MySqlTaskRepository>, TaskApiServer<MySqlTaskRepository>)> {
    info!("Initializing application");

    let repository = create_repository(config)
        .await
        .context("Failed to create repository")?;

    let server = create_server(repository.clone(), config);

    info!("Application initialized successfully");
    Ok((repository, server))
}
