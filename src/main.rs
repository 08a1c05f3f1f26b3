//! Leave Policy Engine server
//!
//! Serves the HTTP API over an in-memory configuration registry.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leave_engine::api::{AppState, create_router};
use leave_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leave_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir =
        std::env::var("LEAVE_ENGINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("failed to load configuration from {}", config_dir))?;
    info!(
        config_dir = %config_dir,
        holidays = config.holidays().holidays.len(),
        "Loaded engine configuration"
    );

    let addr = format!(
        "{}:{}",
        config.settings().server.host,
        config.settings().server.port
    );
    let app = create_router(AppState::new(config));

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
