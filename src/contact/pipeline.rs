//! Contact form controller.
//!
//! Two stages:
//! - validation: synchronous, runs on every attempt, blocks the network call
//!   when any field fails
//! - submission: Ready -> Submitting -> Succeeded | Failed
//!
//! A successful send clears the form and shows the success notice. A failed
//! send leaves the form as typed so nothing is lost.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::form::{ContactForm, Field, apply};
use super::notice::SuccessNotice;
use super::relay::RelayClient;
use super::validate::{ValidationErrors, validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Ready,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid,
    Sent,
    Failed,
}

pub struct ContactPipeline {
    relay: RelayClient,
    form: ContactForm,
    errors: ValidationErrors,
    phase: watch::Sender<SubmitPhase>,
    notice: SuccessNotice,
}

impl ContactPipeline {
    pub fn new(relay: RelayClient) -> Self {
        Self::with_notice(relay, SuccessNotice::default())
    }

    pub fn with_notice(relay: RelayClient, notice: SuccessNotice) -> Self {
        let (phase, _) = watch::channel(SubmitPhase::Ready);
        Self {
            relay,
            form: ContactForm::default(),
            errors: ValidationErrors::default(),
            phase,
            notice,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Errors from the most recent submit attempt.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn phase(&self) -> SubmitPhase {
        *self.phase.borrow()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<SubmitPhase> {
        self.phase.subscribe()
    }

    /// The submit control is disabled while this is true.
    pub fn is_submitting(&self) -> bool {
        self.phase() == SubmitPhase::Submitting
    }

    pub fn notice(&self) -> &SuccessNotice {
        &self.notice
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let form = std::mem::take(&mut self.form);
        self.form = apply(form, field, value);
        self.reset_finished_phase();
    }

    // A finished submission goes back to Ready once the user acts again.
    fn reset_finished_phase(&self) {
        self.phase.send_if_modified(|p| match p {
            SubmitPhase::Succeeded | SubmitPhase::Failed => {
                *p = SubmitPhase::Ready;
                true
            }
            _ => false,
        });
    }

    pub fn set_form(&mut self, form: ContactForm) {
        for field in Field::ALL {
            self.set_field(field, form.get(field));
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        self.errors = validate(&self.form);
        if !self.errors.is_empty() {
            debug!(invalid = self.errors.len(), "contact form rejected by validation");
            self.reset_finished_phase();
            return SubmitOutcome::Invalid;
        }

        self.phase.send_replace(SubmitPhase::Submitting);
        let sent = self.relay.send(&self.form).await;

        if sent {
            info!("contact message relayed");
            self.form = ContactForm::default();
            self.notice.show();
            self.phase.send_replace(SubmitPhase::Succeeded);
            SubmitOutcome::Sent
        } else {
            warn!("contact message was not delivered; keeping form input");
            self.phase.send_replace(SubmitPhase::Failed);
            SubmitOutcome::Failed
        }
    }
}
