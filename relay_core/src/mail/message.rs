//! Provider-facing email payload

use serde::{Deserialize, Serialize};

use super::template::{render_html_body, subject_for};
use crate::config::MailConfig;
use crate::models::ContactSubmission;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub name: String,
    pub email: String,
}

/// Wire shape of Brevo's `POST /v3/smtp/email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEmail {
    pub sender: EmailAddress,
    pub to: Vec<EmailAddress>,
    pub subject: String,
    pub html_content: String,
}

/// Builds the notification for the site owner. The submitter becomes the
/// sender so that replying goes straight back to them.
pub fn compose(submission: &ContactSubmission, mail: &MailConfig) -> askama::Result<OutboundEmail> {
    Ok(OutboundEmail {
        sender: EmailAddress {
            name: submission.name.clone(),
            email: submission.email.clone(),
        },
        to: vec![EmailAddress {
            name: mail.recipient_name.clone(),
            email: mail.recipient_email.clone(),
        }],
        subject: subject_for(&submission.name),
        html_content: render_html_body(submission)?,
    })
}
