//! Brevo transactional email client

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{ApiKey, MailError, MailProvider, OutboundEmail};
use crate::config::MailConfig;

const API_KEY_HEADER: &str = "api-key";

/// Error document Brevo returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct BrevoErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct BrevoClient {
    http: reqwest::Client,
    endpoint: String,
}

impl BrevoClient {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(default_headers)
            .user_agent(concat!("contact-relay/", env!("CARGO_PKG_VERSION")));

        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: config.provider_url.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MailProvider for BrevoClient {
    async fn deliver(&self, api_key: &ApiKey, email: &OutboundEmail) -> Result<(), MailError> {
        let mut api_key = HeaderValue::from_str(api_key.expose())
            .map_err(|_| MailError::Transport("API key contains invalid header characters".to_string()))?;
        api_key.set_sensitive(true);

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, api_key)
            .json(email)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "Brevo accepted the email");
            return Ok(());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!(status = status.as_u16(), error = %err, "failed to read Brevo error body");
                String::new()
            }
        };
        let parsed = serde_json::from_str::<BrevoErrorBody>(&body).ok();

        warn!(
            status = status.as_u16(),
            code = ?parsed.as_ref().and_then(|b| b.code.as_deref()),
            body = %body,
            "Brevo rejected the email"
        );

        Err(MailError::Api {
            status,
            message: parsed.and_then(|b| b.message),
        })
    }

    fn name(&self) -> &'static str {
        "brevo"
    }
}
