//! # Chat Manager
//!
//! Application entry point: loads configuration, initializes tracing,
//! selects the storage backend and serves the HTTP API.

use anyhow::Result;
use tracing::info;

use chat_manager::config::Settings;
use chat_manager::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Settings first: the log format is configurable.
    let settings = Settings::load()?;
    chat_manager::telemetry::init_tracing(&settings.log);

    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        backend = ?settings.storage.backend,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
