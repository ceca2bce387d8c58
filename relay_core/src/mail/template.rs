//! HTML rendering of the notification email

use askama::Template;

use crate::models::ContactSubmission;

/// Body of the notification sent to the site owner. Every field is
/// HTML-escaped by the template.
#[derive(Template)]
#[template(path = "contact_email.html")]
pub struct ContactEmail<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub message: &'a str,
}

impl<'a> From<&'a ContactSubmission> for ContactEmail<'a> {
    fn from(submission: &'a ContactSubmission) -> Self {
        Self {
            name: &submission.name,
            email: &submission.email,
            message: &submission.message,
        }
    }
}

pub fn subject_for(name: &str) -> String {
    format!("Nouveau message de contact de {}", name)
}

pub fn render_html_body(submission: &ContactSubmission) -> askama::Result<String> {
    ContactEmail::from(submission).render()
}

mod filters {
    use std::fmt::Display;

    /// Applied after escaping, so the `<br>` it inserts is the only markup.
    pub fn line_breaks<T: Display>(value: T) -> askama::Result<String> {
        Ok(value.to_string().replace("\r\n", "<br>").replace('\n', "<br>"))
    }
}
