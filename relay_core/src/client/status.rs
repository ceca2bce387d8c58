use serde::{Deserialize, Serialize};

/// What the user has typed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormFields {
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.message]
            .iter()
            .all(|value| !value.is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormStatus {
    pub loading: bool,
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Loading,
    Success,
    Error,
}

impl FormStatus {
    pub fn loading() -> Self {
        Self {
            loading: true,
            success: false,
            error: None,
        }
    }

    pub fn succeeded() -> Self {
        Self {
            loading: false,
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            loading: false,
            success: false,
            error: Some(message.into()),
        }
    }

    pub fn phase(&self) -> FormPhase {
        if self.loading {
            FormPhase::Loading
        } else if self.error.is_some() {
            FormPhase::Error
        } else if self.success {
            FormPhase::Success
        } else {
            FormPhase::Idle
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The relay accepted the message.
    Sent,
    /// A field was empty; nothing was sent.
    Incomplete,
    /// The relay or the network failed; carries the message shown to the user.
    Failed(String),
    /// Another submission was still in flight.
    Ignored,
}
