use folio_extern_contracts::relay::MockMailRelayService;
use folio_models::contact::{validate, ContactInput, ValidatedContact};
use folio_notify_contracts::MockNotifyService;
use tokio::sync::oneshot;

use crate::ContactFormServiceImpl;

mod reset;

type Sut = ContactFormServiceImpl<MockMailRelayService, MockNotifyService>;

fn valid_input() -> ContactInput {
    ContactInput {
        name: "Jo".into(),
        email: "jo@x.com".into(),
        phone: Some(String::new()),
        message: "Hello there".into(),
    }
}

fn other_valid_input() -> ContactInput {
    ContactInput {
        name: "Max Mustermann".into(),
        email: "max.mustermann@example.de".into(),
        phone: Some("+49 171 1234567".into()),
        message: "Hello World!".into(),
    }
}

fn contact(input: &ContactInput) -> ValidatedContact {
    validate(input).unwrap()
}

/// A relay whose single `send` call only completes once the returned sender
/// fires (or is dropped).
fn gated_relay(input: &ContactInput) -> (MockMailRelayService, oneshot::Sender<()>) {
    let (tx, rx) = oneshot::channel();
    let mut relay = MockMailRelayService::new();
    relay
        .expect_send()
        .once()
        .with(mockall::predicate::eq(contact(input)))
        .return_once(move |_| {
            Box::pin(async move {
                let _ = rx.await;
                Ok(())
            })
        });
    (relay, tx)
}
