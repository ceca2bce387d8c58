//! JSON body extractor that answers in the relay's error shape

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Reads the body as JSON whatever the `Content-Type` says. A malformed body
/// becomes `400 {"error": ...}` instead of axum's plain-text rejection.
pub struct RelayJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for RelayJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::InvalidJson(format!("unreadable body: {}", rejection)))?;

        serde_json::from_slice::<T>(&bytes)
            .map(RelayJson)
            .map_err(|err| AppError::InvalidJson(describe(&err)))
    }
}

fn describe(err: &serde_json::Error) -> String {
    use serde_json::error::Category;

    match err.classify() {
        Category::Data => format!("data error: {}", err),
        Category::Syntax | Category::Eof => format!("syntax error: {}", err),
        Category::Io => format!("io error: {}", err),
    }
}
