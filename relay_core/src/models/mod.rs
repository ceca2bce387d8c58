//! Data models for the relay API

pub mod contact;
pub mod request;

pub use contact::{ContactSubmission, ErrorBody, RelayReceipt};
pub use request::ApiResponse;
