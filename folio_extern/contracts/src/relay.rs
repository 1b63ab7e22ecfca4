use std::{future::Future, time::Duration};

use folio_models::contact::ValidatedContact;
use thiserror::Error;

/// External service that delivers a contact message by email on our behalf.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait MailRelayService: Send + Sync + 'static {
    /// Deliver the given contact message.
    fn send(
        &self,
        contact: ValidatedContact,
    ) -> impl Future<Output = Result<(), MailRelayError>> + Send;
}

#[derive(Debug, Error)]
pub enum MailRelayError {
    #[error("Mail relay rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Mail relay did not respond within {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockMailRelayService {
    pub fn with_send(mut self, contact: ValidatedContact, result: Result<(), MailRelayError>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(contact))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
