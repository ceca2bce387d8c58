//! Validation rules for contact submissions

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

pub const CODE_REQUIRED: &str = "required";
pub const CODE_EMAIL_FORMAT: &str = "email_format";

lazy_static! {
    // local-part "@" domain "." tld, nothing more
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub fn validate_present(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(CODE_REQUIRED));
    }
    Ok(())
}

pub fn validate_email_format(email: &str) -> Result<(), ValidationError> {
    if !is_valid_email(email) {
        return Err(ValidationError::new(CODE_EMAIL_FORMAT));
    }
    Ok(())
}

/// Presence first, so an empty address reads as a missing field.
pub fn validate_contact_email(email: &str) -> Result<(), ValidationError> {
    validate_present(email)?;
    validate_email_format(email)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
