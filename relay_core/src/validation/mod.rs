//! Gatekeeping for incoming contact submissions

pub mod rules;

pub use rules::{is_valid_email, validate_contact_email, validate_email_format, validate_present};

use validator::{Validate, ValidationErrors};

use crate::error::{AppError, Result};
use crate::models::contact::{ContactSubmission, INVALID_EMAIL_MESSAGE, MISSING_FIELDS_MESSAGE};

/// Runs the presence gate, then the email format gate.
///
/// Only the first failing gate is reported, so an empty email is a missing
/// field rather than a malformed address.
pub fn validate_submission(submission: &ContactSubmission) -> Result<()> {
    match submission.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(first_failure(&errors)),
    }
}

fn first_failure(errors: &ValidationErrors) -> AppError {
    if has_code(errors, rules::CODE_REQUIRED) {
        return AppError::Validation(MISSING_FIELDS_MESSAGE.to_string());
    }

    if has_code(errors, rules::CODE_EMAIL_FORMAT) {
        return AppError::Validation(INVALID_EMAIL_MESSAGE.to_string());
    }

    AppError::Validation(MISSING_FIELDS_MESSAGE.to_string())
}

fn has_code(errors: &ValidationErrors, code: &str) -> bool {
    errors
        .field_errors()
        .into_iter()
        .any(|(_, field_errors)| field_errors.iter().any(|error| error.code == code))
}
