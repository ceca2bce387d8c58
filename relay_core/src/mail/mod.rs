//! Outbound transactional email

pub mod brevo;
pub mod message;
pub mod template;

pub use brevo::BrevoClient;
pub use message::{compose, EmailAddress, OutboundEmail};

use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

use crate::models::contact::UNKNOWN_SEND_ERROR_MESSAGE;

/// Provider credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Error, Debug)]
pub enum MailError {
    /// The provider answered with a non-2xx status.
    #[error("provider rejected the email with status {status}")]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),
}

impl MailError {
    /// Best available explanation for the submitter: the provider's own
    /// message, then the transport message, then a fixed fallback.
    pub fn user_message(&self) -> String {
        let candidate = match self {
            MailError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            MailError::Api { status, .. } => {
                format!("Request failed with status code {}", status.as_u16())
            }
            MailError::Transport(message) => message.clone(),
        };

        if candidate.trim().is_empty() {
            UNKNOWN_SEND_ERROR_MESSAGE.to_string()
        } else {
            candidate
        }
    }
}

impl From<reqwest::Error> for MailError {
    fn from(err: reqwest::Error) -> Self {
        MailError::Transport(err.to_string())
    }
}

/// A transactional email service.
#[async_trait]
pub trait MailProvider: Send + Sync {
    async fn deliver(&self, api_key: &ApiKey, email: &OutboundEmail) -> Result<(), MailError>;

    fn name(&self) -> &'static str;
}
