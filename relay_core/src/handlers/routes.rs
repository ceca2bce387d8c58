//! Route table

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

use super::{contact::handle_send_email, health::handle_health};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/send-email", post(handle_send_email))
}
