use std::{path::Path, time::Duration};

use folio_config::{RelayConfig, DEFAULT_CONFIG_PATH};
use folio_extern_contracts::relay::{MailRelayError, MailRelayService};
use folio_extern_impl::emailjs::{EmailJsRelayConfig, EmailJsRelayServiceImpl};
use folio_models::contact::{validate, ContactInput, ValidatedContact};
use folio_testing::emailjs::{EmailJsCredentials, EmailJsServer, SEND_ROUTE};
use folio_utils::assert_matches;
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;

#[tokio::test]
async fn ok() {
    let (sut, server) = setup(&[], Duration::ZERO).await;

    sut.send(contact(None)).await.unwrap();

    let inbox = server.inbox().await;
    assert_eq!(inbox.len(), 1);
    assert_eq!(
        inbox[0].iter().collect::<Vec<_>>(),
        [
            (&"email".to_owned(), &"jo@x.com".to_owned()),
            (&"message".to_owned(), &"Hello there".to_owned()),
            (&"name".to_owned(), &"Jo".to_owned()),
        ]
    );
}

#[tokio::test]
async fn ok_with_phone() {
    let (sut, server) = setup(&[], Duration::ZERO).await;

    sut.send(contact(Some("+91 9876543210"))).await.unwrap();

    let inbox = server.inbox().await;
    assert_eq!(inbox[0]["phone"], "+91 9876543210");
}

#[tokio::test]
async fn ok_with_private_key() {
    let (sut, server) = setup(&["relay.private_key = \"private\""], Duration::ZERO).await;

    sut.send(contact(None)).await.unwrap();

    assert_eq!(server.inbox().await.len(), 1);
}

#[tokio::test]
async fn rejected_credentials() {
    let (sut, server) = setup(&["relay.public_key = \"other\""], Duration::ZERO).await;

    let result = sut.send(contact(None)).await;

    assert_matches!(
        result,
        Err(MailRelayError::Rejected { status: 400, body }) if body == "The Public Key is invalid"
    );
    assert!(server.inbox().await.is_empty());
}

#[tokio::test]
async fn timeout() {
    let (sut, server) = setup(&["relay.timeout = \"100ms\""], Duration::from_secs(2)).await;

    let result = sut.send(contact(None)).await;

    assert_matches!(result, Err(MailRelayError::Timeout(timeout)) if *timeout == Duration::from_millis(100));
    assert!(server.inbox().await.is_empty());
}

#[tokio::test]
async fn unreachable() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let endpoint = format!("http://{}{SEND_ROUTE}", listener.local_addr().unwrap());
    drop(listener);

    let config = load_relay_config(&[]);
    let sut = EmailJsRelayServiceImpl::new(EmailJsRelayConfig::new(
        Some(endpoint.parse().unwrap()),
        &config.service_id,
        &config.template_id,
        &config.public_key,
        None,
        config.timeout.into(),
    ))
    .unwrap();

    let result = sut.send(contact(None)).await;

    assert_matches!(result, Err(MailRelayError::Other(_)));
}

fn contact(phone: Option<&str>) -> ValidatedContact {
    validate(&ContactInput {
        name: "Jo".into(),
        email: "jo@x.com".into(),
        phone: phone.map(Into::into),
        message: "Hello there".into(),
    })
    .unwrap()
}

fn load_relay_config(overrides: &[&str]) -> RelayConfig {
    let paths = vec![Path::new(DEFAULT_CONFIG_PATH)];
    folio_config::load_with_override(&paths, overrides)
        .unwrap()
        .relay
}

/// Starts an EmailJS testing server that accepts the credentials of the
/// default config and returns a relay client for it. `overrides` only affect
/// the client.
async fn setup(overrides: &[&str], delay: Duration) -> (EmailJsRelayServiceImpl, EmailJsServer) {
    let defaults = load_relay_config(&[]);
    let server = EmailJsServer::new(
        EmailJsCredentials {
            service_id: defaults.service_id,
            template_id: defaults.template_id,
            public_key: defaults.public_key,
            private_key: overrides
                .iter()
                .any(|o| o.starts_with("relay.private_key"))
                .then(|| "private".into()),
        },
        delay,
    );

    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let endpoint = format!("http://{}{SEND_ROUTE}", listener.local_addr().unwrap());
    tokio::spawn(server.clone().serve(listener));

    let config = load_relay_config(overrides);
    let sut = EmailJsRelayServiceImpl::new(EmailJsRelayConfig::new(
        Some(endpoint.parse().unwrap()),
        &config.service_id,
        &config.template_id,
        &config.public_key,
        config.private_key.as_deref(),
        config.timeout.into(),
    ))
    .unwrap();

    (sut, server)
}
