//! Contact form payloads exchanged with the browser

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::validation::rules::{validate_contact_email, validate_present};

pub const MISSING_FIELDS_MESSAGE: &str = "Nom, email et message sont requis";
pub const INVALID_EMAIL_MESSAGE: &str = "Adresse email invalide";
pub const MISSING_API_KEY_MESSAGE: &str = "Clé API Brevo manquante ou invalide";
pub const DELIVERED_MESSAGE: &str = "Email envoyé avec succès";
pub const UNKNOWN_SEND_ERROR_MESSAGE: &str = "Erreur inconnue lors de l'envoi de l'email";

/// One contact form submission. Lives for a single request.
///
/// Absent and `null` fields deserialize to empty strings so that the
/// presence check reports them rather than the JSON parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactSubmission {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_present"))]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_contact_email"))]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_present"))]
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a `200` from the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayReceipt {
    pub success: bool,
    pub message: String,
}

impl RelayReceipt {
    pub fn delivered() -> Self {
        Self {
            success: true,
            message: DELIVERED_MESSAGE.to_string(),
        }
    }
}

/// Body of every `4xx`/`5xx` from the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
