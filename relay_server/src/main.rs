//! Main entry point for the contact relay binary

use anyhow::Result;
use relay_core::{config::API_KEY_ENV, create_app_with_config, run_server_with_shutdown, AppConfig, AppState};
use std::{net::SocketAddr, time::Duration};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());
    info!("Forwarding contact submissions to {} <{}>", config.mail.recipient_name, config.mail.recipient_email);

    if !config.mail.is_configured() {
        warn!("{} is missing - /api/send-email will answer 500 until it is set", API_KEY_ENV);
    }

    let addr: SocketAddr = config.bind_address().parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    info!("Environment: {}", std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string()));

    let state = AppState::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize relay: {}", e))?;

    info!("App: {} v{}", state.app_name, state.version);

    let app = create_app_with_config(state, &config);
    let grace_period = Duration::from_secs(config.server.shutdown_timeout_seconds);

    run_server_with_shutdown(app, addr, grace_period).await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let default_level = if cfg!(debug_assertions) {
                "debug"
            } else {
                "info"
            };

            format!(
                "{}={},relay_core={},tower_http=debug,axum=debug",
                env!("CARGO_CRATE_NAME").replace('-', "_"),
                default_level,
                default_level
            ).into()
        });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
