//! Contact form relay: validates portfolio contact submissions and forwards
//! them to a transactional email provider.

pub mod client;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod mail;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod services;
pub mod validation;

pub use client::{ContactForm, FormFields, FormStatus, SubmitOutcome};
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use handlers::routes::create_routes;
pub use mail::{ApiKey, BrevoClient, MailError, MailProvider, OutboundEmail};
pub use metrics::{MetricsSnapshot, RelayMetrics};
pub use models::{ContactSubmission, RelayReceipt};
pub use services::RelayService;

use axum::Router;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub relay: RelayService,
}

impl AppState {
    pub fn new(relay: RelayService) -> Self {
        Self {
            app_name: "Contact Relay".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            relay,
        }
    }

    /// Wires the Brevo client from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let provider = BrevoClient::new(&config.mail)
            .map_err(|e| AppError::Other(anyhow::anyhow!("Failed to build mail client: {}", e)))?;
        info!("Mail provider endpoint: {}", provider.endpoint());

        let relay = RelayService::new(Arc::new(provider), config.mail.clone());
        Ok(Self::new(relay))
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(middleware::cors::cors_layer_from_config(&config.cors))
        .layer(middleware::logging::logging_layer())
        .with_state(state)
}

pub async fn run_server_with_shutdown(
    app: Router,
    addr: SocketAddr,
    grace_period: Duration,
) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Other(anyhow::anyhow!("Failed to bind {}: {}", addr, e)))?;

    let server = async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    };

    // Once a shutdown signal arrives, in-flight provider calls get a bounded
    // window to finish.
    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::Other(anyhow::anyhow!("Server error: {}", e)))?;
        }
        _ = async {
            shutdown_signal().await;
            tokio::time::sleep(grace_period).await;
        } => {
            tracing::warn!("Graceful shutdown exceeded {:?}, exiting", grace_period);
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
