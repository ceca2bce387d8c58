use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::status::{FormFields, FormStatus, SubmitOutcome};
use super::{INCOMPLETE_FORM_MESSAGE, NETWORK_ERROR_MESSAGE, SUBMIT_FAILED_MESSAGE};

/// How long the success banner stays up.
pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(5);

/// A contact form bound to one relay endpoint.
///
/// At most one submission is in flight at a time; `submit` called while
/// another is pending returns [`SubmitOutcome::Ignored`] and changes nothing.
pub struct ContactForm {
    http: reqwest::Client,
    endpoint: String,
    success_display: Duration,
    fields: Mutex<FormFields>,
    status: Arc<Mutex<FormStatus>>,
    in_flight: AtomicBool,
    // bumped on every success so an older reset timer cannot hide a newer banner
    success_generation: Arc<AtomicU64>,
}

impl ContactForm {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            success_display: SUCCESS_DISPLAY,
            fields: Mutex::new(FormFields::default()),
            status: Arc::new(Mutex::new(FormStatus::default())),
            in_flight: AtomicBool::new(false),
            success_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_success_display(mut self, duration: Duration) -> Self {
        self.success_display = duration;
        self
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.fields.lock().name = name.into();
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.fields.lock().email = email.into();
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.fields.lock().message = message.into();
    }

    pub fn fields(&self) -> FormFields {
        self.fields.lock().clone()
    }

    pub fn status(&self) -> FormStatus {
        self.status.lock().clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_guard) = SubmissionGuard::acquire(&self.in_flight) else {
            debug!("submission already in flight, ignoring");
            return SubmitOutcome::Ignored;
        };

        let fields = self.fields();
        if !fields.is_complete() {
            *self.status.lock() = FormStatus::failed(INCOMPLETE_FORM_MESSAGE);
            return SubmitOutcome::Incomplete;
        }

        *self.status.lock() = FormStatus::loading();

        match self.post(&fields).await {
            Ok(()) => {
                self.fields.lock().clear();
                *self.status.lock() = FormStatus::succeeded();
                self.schedule_success_reset();
                SubmitOutcome::Sent
            }
            Err(message) => {
                *self.status.lock() = FormStatus::failed(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    async fn post(&self, fields: &FormFields) -> Result<(), String> {
        let response = match self.http.post(&self.endpoint).json(fields).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(endpoint = %self.endpoint, error = %err, "contact relay unreachable");
                return Err(NETWORK_ERROR_MESSAGE.to_string());
            }
        };

        let status = response.status();
        let body = match response.json::<serde_json::Value>().await {
            Ok(body) => Some(body),
            Err(err) => {
                debug!(status = status.as_u16(), error = %err, "contact relay reply is not JSON");
                None
            }
        };

        if status.is_success() {
            if body.is_none() {
                warn!(status = status.as_u16(), "contact relay answered 2xx without a JSON body");
                return Err(SUBMIT_FAILED_MESSAGE.to_string());
            }
            return Ok(());
        }

        let message = body
            .as_ref()
            .and_then(|body| body.get("error"))
            .and_then(|error| error.as_str())
            .filter(|error| !error.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| SUBMIT_FAILED_MESSAGE.to_string());

        debug!(status = status.as_u16(), error = %message, "contact relay refused submission");
        Err(message)
    }

    fn schedule_success_reset(&self) {
        let generation = self.success_generation.fetch_add(1, Ordering::AcqRel) + 1;
        let current = Arc::clone(&self.success_generation);
        let status = Arc::clone(&self.status);
        let delay = self.success_display;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::Acquire) == generation {
                status.lock().success = false;
            }
        });
    }
}

/// Holds the in-flight flag; released on drop, including when the submit
/// future is cancelled.
struct SubmissionGuard<'a>(&'a AtomicBool);

impl<'a> SubmissionGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
