use std::future::Future;

use folio_models::contact::{ContactField, ContactInput, FieldErrors, SubmissionState};
use thiserror::Error;
use tokio::sync::watch;

/// Owns the state of a single contact form and drives the
/// validate → send → notify cycle.
pub trait ContactFormService: Send + Sync + 'static {
    /// Returns the current input, field errors and submission state.
    fn snapshot(&self) -> ContactFormSnapshot;

    /// Returns a receiver that is notified whenever the snapshot changes.
    fn subscribe(&self) -> watch::Receiver<ContactFormSnapshot>;

    /// Replace the value of a single field. Does not validate.
    fn set_field(&self, field: ContactField, value: String) -> Result<(), ContactFormEditError>;

    /// Reset the input to empty and drop all field errors.
    fn clear(&self) -> Result<(), ContactFormEditError>;

    /// Validate `input` and, if it is valid, send it through the mail relay.
    ///
    /// Calls made while another submission is in flight are ignored.
    fn submit(&self, input: ContactInput) -> impl Future<Output = SubmitOutcome> + Send;

    /// Same as [`submit`](Self::submit) with the currently stored input.
    fn submit_current(&self) -> impl Future<Output = SubmitOutcome> + Send;

    /// Return to [`SubmissionState::Idle`] and drop all field errors, keeping
    /// the input. Has no effect while a submission is in flight.
    fn reset(&self);

    /// Detach the form. A pending relay call is abandoned and no further
    /// state changes or notifications happen.
    fn dispose(&self);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormSnapshot {
    pub input: ContactInput,
    pub errors: FieldErrors,
    pub state: SubmissionState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed, nothing was sent.
    Invalid(FieldErrors),
    Sent,
    Failed,
    /// Another submission was in flight or the form was disposed.
    Ignored,
    /// The form was disposed while the message was being sent.
    Abandoned,
}

#[derive(Debug, Error)]
pub enum ContactFormEditError {
    #[error("The form is read-only while a message is being sent.")]
    Submitting,
    #[error("The form has been disposed.")]
    Disposed,
}
