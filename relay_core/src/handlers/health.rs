//! Health check handler

use crate::{models::ApiResponse, AppState};
use axum::{extract::State, response::IntoResponse, Json};
use tracing::{debug, warn};

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    debug!("GET /health");

    let provider_configured = state.relay.is_configured();
    if !provider_configured {
        warn!("Health check: mail provider credential is not configured");
    }

    let status = if provider_configured { "healthy" } else { "degraded" };

    Json(ApiResponse::success(serde_json::json!({
        "status": status,
        "app": state.app_name,
        "version": state.version,
        "timestamp": chrono::Utc::now().timestamp(),
        "provider": state.relay.provider_name(),
        "provider_configured": provider_configured,
        "relay": state.relay.metrics().snapshot(),
    })))
}
