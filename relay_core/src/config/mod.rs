//! Application configuration

pub mod settings;

pub use settings::{AppConfig, CorsConfig, MailConfig, ServerConfig, API_KEY_ENV, DEFAULT_PROVIDER_URL};
