use crate::{
    config::MailConfig,
    error::{AppError, Result},
    mail::{compose, ApiKey, MailProvider},
    metrics::RelayMetrics,
    models::contact::{ContactSubmission, RelayReceipt, MISSING_API_KEY_MESSAGE},
    validation::validate_submission,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Validates a submission and hands it to the mail provider.
#[derive(Clone)]
pub struct RelayService {
    provider: Arc<dyn MailProvider>,
    mail: MailConfig,
    metrics: RelayMetrics,
}

impl RelayService {
    pub fn new(provider: Arc<dyn MailProvider>, mail: MailConfig) -> Self {
        Self {
            provider,
            mail,
            metrics: RelayMetrics::new(),
        }
    }

    pub fn metrics(&self) -> &RelayMetrics {
        &self.metrics
    }

    pub fn is_configured(&self) -> bool {
        self.mail.is_configured()
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn relay(&self, submission: ContactSubmission) -> Result<RelayReceipt> {
        let submission_id = Uuid::new_v4();
        self.metrics.record_received();

        if let Err(err) = validate_submission(&submission) {
            self.metrics.record_rejected();
            info!(%submission_id, reason = %err, "contact submission rejected");
            return Err(err);
        }

        let api_key = match self.mail.credential() {
            Some(key) => ApiKey::new(key),
            None => {
                self.metrics.record_unconfigured();
                warn!(%submission_id, "provider API key is missing or set to a placeholder");
                return Err(AppError::Configuration(MISSING_API_KEY_MESSAGE.to_string()));
            }
        };

        let email = compose(&submission, &self.mail).map_err(|err| {
            self.metrics.record_failed();
            AppError::Internal(format!("failed to render notification email: {}", err))
        })?;

        info!(
            %submission_id,
            provider = self.provider.name(),
            sender = %submission.email,
            "relaying contact submission"
        );

        match self.provider.deliver(&api_key, &email).await {
            Ok(()) => {
                self.metrics.record_delivered();
                info!(%submission_id, "contact email delivered");
                Ok(RelayReceipt::delivered())
            }
            Err(err) => {
                self.metrics.record_failed();
                error!(%submission_id, error = %err, "failed to send contact email");
                Err(AppError::Provider(err.user_message()))
            }
        }
    }
}
