use folio_core_contact_contracts::ContactFormService;
use folio_extern_contracts::relay::{MailRelayError, MockMailRelayService};
use folio_models::contact::{ContactInput, SubmissionState};
use folio_notify_contracts::{MockNotifyService, Notification};
use pretty_assertions::assert_eq;

use super::{contact, valid_input, Sut};
use crate::FAILURE_MESSAGE;

async fn failed_sut() -> Sut {
    let relay = MockMailRelayService::new().with_send(
        contact(&valid_input()),
        Err(MailRelayError::Rejected {
            status: 500,
            body: "Internal Server Error".into(),
        }),
    );
    let notify = MockNotifyService::new().with_notify(Notification::failure(FAILURE_MESSAGE));

    let sut = Sut::new(relay, notify);
    sut.submit(valid_input()).await;
    assert_eq!(sut.snapshot().state, SubmissionState::Failed);
    sut
}

#[tokio::test]
async fn reset_after_failure_keeps_input() {
    // Arrange
    let sut = failed_sut().await;

    // Act
    sut.reset();

    // Assert
    let snapshot = sut.snapshot();
    assert_eq!(snapshot.state, SubmissionState::Idle);
    assert!(snapshot.errors.is_empty());
    assert_eq!(snapshot.input, valid_input());
}

#[tokio::test]
async fn reset_twice_is_idempotent() {
    // Arrange
    let sut = failed_sut().await;

    // Act
    sut.reset();
    let first = sut.snapshot();
    sut.reset();
    let second = sut.snapshot();

    // Assert
    assert_eq!(first, second);
    assert_eq!(second.state, SubmissionState::Idle);
    assert!(second.errors.is_empty());
}

#[tokio::test]
async fn reset_clears_field_errors() {
    // Arrange
    let sut = Sut::new(MockMailRelayService::new(), MockNotifyService::new());
    let input = ContactInput {
        name: "J".into(),
        ..valid_input()
    };
    sut.submit(input.clone()).await;
    assert!(!sut.snapshot().errors.is_empty());

    // Act
    sut.reset();

    // Assert
    let snapshot = sut.snapshot();
    assert!(snapshot.errors.is_empty());
    assert_eq!(snapshot.input, input);
}

#[test]
fn reset_when_idle_does_not_notify_subscribers() {
    // Arrange
    let sut = Sut::new(MockMailRelayService::new(), MockNotifyService::new());
    let form = sut.subscribe();

    // Act
    sut.reset();

    // Assert
    assert!(!form.has_changed().unwrap());
}
