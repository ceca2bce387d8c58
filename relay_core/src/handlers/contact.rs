//! `POST /api/send-email`

use crate::{
    error::Result,
    extractors::RelayJson,
    models::{ContactSubmission, RelayReceipt},
    AppState,
};
use axum::{extract::State, Json};
use tracing::debug;

pub async fn handle_send_email(
    State(state): State<AppState>,
    RelayJson(submission): RelayJson<ContactSubmission>,
) -> Result<Json<RelayReceipt>> {
    debug!("POST /api/send-email - name: {}", submission.name);

    let receipt = state.relay.relay(submission).await?;
    Ok(Json(receipt))
}
