use std::sync::Arc;

use folio_core_contact_contracts::{
    ContactFormEditError, ContactFormService, ContactFormSnapshot, SubmitOutcome,
};
use folio_extern_contracts::relay::MailRelayService;
use folio_models::contact::{
    validate, ContactField, ContactInput, FieldErrors, SubmissionState,
};
use folio_notify_contracts::{Notification, NotifyService};
use folio_utils::trace_instrument;
use tokio::sync::watch;
use tracing::{debug, warn};

#[cfg(test)]
mod tests;

pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const FAILURE_MESSAGE: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone)]
pub struct ContactFormServiceImpl<Relay, Notify> {
    relay: Relay,
    notify: Notify,
    form: Arc<watch::Sender<ContactFormSnapshot>>,
    disposed: Arc<watch::Sender<bool>>,
}

impl<Relay, Notify> ContactFormServiceImpl<Relay, Notify> {
    pub fn new(relay: Relay, notify: Notify) -> Self {
        Self {
            relay,
            notify,
            form: Arc::new(watch::channel(ContactFormSnapshot::default()).0),
            disposed: Arc::new(watch::channel(false).0),
        }
    }

    fn is_disposed(&self) -> bool {
        *self.disposed.borrow()
    }

    /// Resolves once the form has been disposed.
    async fn disposal(&self) {
        let mut disposed = self.disposed.subscribe();
        while !*disposed.borrow_and_update() {
            if disposed.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    fn edit(
        &self,
        f: impl FnOnce(&mut ContactFormSnapshot),
    ) -> Result<(), ContactFormEditError> {
        let mut result = Ok(());
        self.form.send_if_modified(|form| {
            if self.is_disposed() {
                result = Err(ContactFormEditError::Disposed);
                return false;
            }
            if form.state.is_submitting() {
                result = Err(ContactFormEditError::Submitting);
                return false;
            }
            f(form);
            true
        });
        result
    }
}

impl<Relay, Notify> ContactFormService for ContactFormServiceImpl<Relay, Notify>
where
    Relay: MailRelayService,
    Notify: NotifyService,
{
    fn snapshot(&self) -> ContactFormSnapshot {
        self.form.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<ContactFormSnapshot> {
        self.form.subscribe()
    }

    #[trace_instrument(skip(self, value))]
    fn set_field(&self, field: ContactField, value: String) -> Result<(), ContactFormEditError> {
        self.edit(|form| form.input.set(field, value))
    }

    #[trace_instrument(skip(self))]
    fn clear(&self) -> Result<(), ContactFormEditError> {
        self.edit(|form| {
            form.input = ContactInput::default();
            form.errors = FieldErrors::default();
        })
    }

    #[trace_instrument(skip(self, input))]
    async fn submit(&self, input: ContactInput) -> SubmitOutcome {
        let mut outcome = SubmitOutcome::Ignored;
        let mut contact = None;

        // the in-flight check and the transition to `Submitting` happen under
        // the same lock, so at most one relay call can be started
        self.form.send_if_modified(|form| {
            if self.is_disposed() || form.state.is_submitting() {
                return false;
            }

            match validate(&input) {
                Ok(valid) => {
                    form.errors = FieldErrors::default();
                    form.state = SubmissionState::Submitting;
                    contact = Some(valid);
                }
                Err(errors) => {
                    if form.state != SubmissionState::Failed {
                        form.state = SubmissionState::Idle;
                    }
                    form.errors = errors.clone();
                    outcome = SubmitOutcome::Invalid(errors);
                }
            }
            form.input = input;
            true
        });

        let Some(contact) = contact else {
            if outcome == SubmitOutcome::Ignored {
                debug!("Submission in flight or form disposed, ignoring submit");
            }
            return outcome;
        };

        let guard = SubmissionGuard {
            form: &self.form,
            disposed: &self.disposed,
            armed: true,
        };
        let result = tokio::select! {
            result = self.relay.send(contact) => result,
            () = self.disposal() => {
                debug!("Form disposed while sending, abandoning relay call");
                return SubmitOutcome::Abandoned;
            }
        };
        guard.disarm();

        if let Err(err) = &result {
            warn!(error = ?err, "Failed to send contact message");
        }

        let mut applied = false;
        self.form.send_if_modified(|form| {
            if self.is_disposed() {
                return false;
            }

            match &result {
                Ok(()) => {
                    form.state = SubmissionState::Succeeded;
                    form.input = ContactInput::default();
                    form.errors = FieldErrors::default();
                }
                Err(_) => form.state = SubmissionState::Failed,
            }
            applied = true;
            true
        });

        match (applied, result.is_ok()) {
            (false, _) => {
                debug!("Form disposed while sending, dropping relay result");
                SubmitOutcome::Abandoned
            }
            (true, true) => {
                self.notify.notify(Notification::success(SUCCESS_MESSAGE));
                SubmitOutcome::Sent
            }
            (true, false) => {
                self.notify.notify(Notification::failure(FAILURE_MESSAGE));
                SubmitOutcome::Failed
            }
        }
    }

    async fn submit_current(&self) -> SubmitOutcome {
        let input = self.snapshot().input;
        self.submit(input).await
    }

    #[trace_instrument(skip(self))]
    fn reset(&self) {
        self.form.send_if_modified(|form| {
            if self.is_disposed() || form.state.is_submitting() {
                return false;
            }
            let modified = form.state != SubmissionState::Idle || !form.errors.is_empty();
            form.state = SubmissionState::Idle;
            form.errors = FieldErrors::default();
            modified
        });
    }

    #[trace_instrument(skip(self))]
    fn dispose(&self) {
        // taking the form lock orders disposal against pending transitions
        self.form.send_if_modified(|_| {
            self.disposed.send_replace(true);
            false
        });
    }
}

/// Returns a live form to [`SubmissionState::Idle`] when a submission is
/// dropped before the relay call completes. The input is kept.
struct SubmissionGuard<'a> {
    form: &'a watch::Sender<ContactFormSnapshot>,
    disposed: &'a watch::Sender<bool>,
    armed: bool,
}

impl SubmissionGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.form.send_if_modified(|form| {
            if *self.disposed.borrow() || !form.state.is_submitting() {
                return false;
            }
            debug!("Submission dropped before completion, returning to idle");
            form.state = SubmissionState::Idle;
            true
        });
    }
}
