use std::{collections::BTreeMap, net::IpAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::Deserialize;
use tokio::{net::TcpListener, sync::Mutex};
use tracing::{info, warn};

pub const SEND_ROUTE: &str = "/api/v1.0/email/send";

/// The only credentials the testing server accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub private_key: Option<String>,
}

/// In-memory stand-in for the EmailJS send endpoint. Accepted template
/// parameters are kept in an inbox for inspection.
#[derive(Debug, Clone)]
pub struct EmailJsServer {
    credentials: Arc<EmailJsCredentials>,
    delay: Duration,
    inbox: Arc<Mutex<Vec<TemplateParams>>>,
}

pub type TemplateParams = BTreeMap<String, String>;

impl EmailJsServer {
    pub fn new(credentials: EmailJsCredentials, delay: Duration) -> Self {
        Self {
            credentials: credentials.into(),
            delay,
            inbox: Default::default(),
        }
    }

    pub async fn inbox(&self) -> Vec<TemplateParams> {
        self.inbox.lock().await.clone()
    }

    pub fn router(&self) -> Router<()> {
        Router::new()
            .route(SEND_ROUTE, routing::post(send))
            .with_state(self.clone())
    }

    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        axum::serve(listener, self.router())
            .await
            .context("Failed to start HTTP server")
    }
}

pub async fn start_server(
    host: IpAddr,
    port: u16,
    credentials: EmailJsCredentials,
    delay: Duration,
) -> anyhow::Result<()> {
    info!("Starting emailjs testing server on {host}:{port}");
    info!("Send endpoint: http://{host}:{port}{SEND_ROUTE}");
    info!("Credentials: {credentials:?}");
    if !delay.is_zero() {
        info!("Responses are delayed by {delay:?}");
    }

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    EmailJsServer::new(credentials, delay).serve(listener).await
}

#[derive(Deserialize)]
struct SendRequest {
    service_id: String,
    template_id: String,
    user_id: String,
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
    template_params: TemplateParams,
}

async fn send(State(server): State<EmailJsServer>, Json(request): Json<SendRequest>) -> Response {
    tokio::time::sleep(server.delay).await;

    let credentials = &*server.credentials;
    let rejection = if request.user_id != credentials.public_key {
        Some((StatusCode::BAD_REQUEST, "The Public Key is invalid"))
    } else if request.service_id != credentials.service_id {
        Some((StatusCode::BAD_REQUEST, "The service ID is invalid"))
    } else if request.template_id != credentials.template_id {
        Some((StatusCode::BAD_REQUEST, "The template ID is invalid"))
    } else if credentials.private_key.is_some() && request.access_token != credentials.private_key
    {
        Some((StatusCode::FORBIDDEN, "The Private Key is invalid"))
    } else if ["name", "email", "message"]
        .iter()
        .any(|&key| !request.template_params.contains_key(key))
    {
        Some((StatusCode::UNPROCESSABLE_ENTITY, "The template params are incomplete"))
    } else {
        None
    };

    if let Some((status, message)) = rejection {
        warn!("Rejecting message: {message}");
        return (status, message).into_response();
    }

    info!("Accepted message: {:?}", request.template_params);
    server.inbox.lock().await.push(request.template_params);
    (StatusCode::OK, "OK").into_response()
}
