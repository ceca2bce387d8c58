use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PROVIDER_URL: &str = "https://api.brevo.com/v3/smtp/email";

/// Environment variable that carries the Brevo credential.
pub const API_KEY_ENV: &str = "BREVO_API_KEY";

/// Placeholder some hosting dashboards write when a variable is left unset.
const UNSET_SENTINEL: &str = "undefined";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub mail: MailConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub provider_url: String,
    pub api_key: Option<String>,
    pub recipient_email: String,
    pub recipient_name: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub max_age_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            mail: MailConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            shutdown_timeout_seconds: 10,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            api_key: None,
            recipient_email: "contact@example.com".to_string(),
            recipient_name: "Portfolio".to_string(),
            timeout_seconds: None,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            max_age_seconds: 3600,
        }
    }
}

impl MailConfig {
    /// The configured credential, or `None` when it is missing, blank or
    /// the literal `"undefined"`.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != UNSET_SENTINEL)
    }

    pub fn is_configured(&self) -> bool {
        self.credential().is_some()
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        Self::finish(builder)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::from(path.as_ref()));

        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            app_config.mail.api_key = Some(key);
        }

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.mail.provider_url.is_empty() {
            return Err(ConfigError::Message(
                "Mail provider URL cannot be empty".to_string(),
            ));
        }

        if !self.mail.provider_url.starts_with("http://")
            && !self.mail.provider_url.starts_with("https://")
        {
            return Err(ConfigError::Message(format!(
                "Mail provider URL must be http(s): {}",
                self.mail.provider_url
            )));
        }

        if self.mail.recipient_email.is_empty() {
            return Err(ConfigError::Message(
                "Recipient email cannot be empty".to_string(),
            ));
        }

        if self.mail.timeout_seconds == Some(0) {
            return Err(ConfigError::Message(
                "Mail timeout must be greater than 0".to_string(),
            ));
        }

        if !self.mail.is_configured() {
            tracing::warn!(
                "{} is not set - contact submissions will be rejected until it is configured",
                API_KEY_ENV
            );
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.mail.provider_url, DEFAULT_PROVIDER_URL);
        assert!(config.mail.timeout_seconds.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.server.port = 0;
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.mail.provider_url = String::new();
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.mail.provider_url = "ftp://api.brevo.com".to_string();
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.mail.timeout_seconds = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");

        let mut config = AppConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.port = 8080;
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_credential_rejects_missing_and_placeholder_keys() {
        let mut mail = MailConfig::default();
        assert_eq!(mail.credential(), None);

        mail.api_key = Some(String::new());
        assert_eq!(mail.credential(), None);

        mail.api_key = Some("   ".to_string());
        assert_eq!(mail.credential(), None);

        mail.api_key = Some("undefined".to_string());
        assert_eq!(mail.credential(), None);
        assert!(!mail.is_configured());

        mail.api_key = Some("xkeysib-123".to_string());
        assert_eq!(mail.credential(), Some("xkeysib-123"));
        assert!(mail.is_configured());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8081

[mail]
recipient_email = "owner@example.org"
recipient_name = "Owner"
timeout_seconds = 15
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).expect("Should load configuration file");

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.mail.recipient_email, "owner@example.org");
        assert_eq!(config.mail.recipient_name, "Owner");
        assert_eq!(config.mail.timeout_seconds, Some(15));
        assert_eq!(config.mail.provider_url, DEFAULT_PROVIDER_URL);
    }
}
