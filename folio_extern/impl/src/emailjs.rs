use std::{sync::Arc, time::Duration};

use folio_extern_contracts::relay::{MailRelayError, MailRelayService};
use folio_models::contact::ValidatedContact;
use folio_utils::trace_instrument;
use serde::Serialize;
use url::Url;

use crate::http::HttpClient;

/// https://www.emailjs.com/docs/rest-api/send/
const SEND_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Mail relay backed by the EmailJS REST API.
#[derive(Debug, Clone)]
pub struct EmailJsRelayServiceImpl {
    config: EmailJsRelayConfig,
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailJsRelayConfig {
    pub endpoint: Arc<Url>,
    pub service_id: Arc<str>,
    pub template_id: Arc<str>,
    pub public_key: Arc<str>,
    pub private_key: Option<Arc<str>>,
    pub timeout: Duration,
}

impl EmailJsRelayConfig {
    pub fn new(
        endpoint_override: Option<Url>,
        service_id: &str,
        template_id: &str,
        public_key: &str,
        private_key: Option<&str>,
        timeout: Duration,
    ) -> Self {
        Self {
            endpoint: endpoint_override
                .unwrap_or_else(|| SEND_ENDPOINT.parse().unwrap())
                .into(),
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
            private_key: private_key.map(Into::into),
            timeout,
        }
    }
}

impl EmailJsRelayServiceImpl {
    pub fn new(config: EmailJsRelayConfig) -> anyhow::Result<Self> {
        let http = HttpClient::new(config.timeout)?;
        Ok(Self { config, http })
    }

    fn transport_error(&self, err: reqwest::Error) -> MailRelayError {
        if err.is_timeout() {
            MailRelayError::Timeout(self.config.timeout)
        } else {
            anyhow::Error::new(err)
                .context("Failed to send mail relay request")
                .into()
        }
    }
}

impl MailRelayService for EmailJsRelayServiceImpl {
    #[trace_instrument(skip(self))]
    async fn send(&self, contact: ValidatedContact) -> Result<(), MailRelayError> {
        let request = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            access_token: self.config.private_key.as_deref(),
            template_params: TemplateParams {
                name: contact.name(),
                email: contact.email().as_str(),
                phone: contact.phone().map(|phone| phone.as_str()),
                message: contact.message(),
            },
        };

        let response = self
            .http
            .post((*self.config.endpoint).clone())
            .json(&request)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|err| self.transport_error(err))?;
            return Err(MailRelayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: TemplateParams<'a>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    name: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    message: &'a str,
}

#[cfg(test)]
mod tests {
    use folio_models::contact::{validate, ContactInput};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn serialize_request() {
        let contact = validate(&ContactInput {
            name: "Jo".into(),
            email: "jo@x.com".into(),
            phone: Some("+91 9876543210".into()),
            message: "Hello there".into(),
        })
        .unwrap();

        let request = SendRequest {
            service_id: "service",
            template_id: "template",
            user_id: "public",
            access_token: None,
            template_params: TemplateParams {
                name: contact.name(),
                email: contact.email().as_str(),
                phone: contact.phone().map(|phone| phone.as_str()),
                message: contact.message(),
            },
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "service_id": "service",
                "template_id": "template",
                "user_id": "public",
                "template_params": {
                    "name": "Jo",
                    "email": "jo@x.com",
                    "phone": "+91 9876543210",
                    "message": "Hello there",
                },
            })
        );
    }

    #[test]
    fn default_endpoint() {
        let config =
            EmailJsRelayConfig::new(None, "s", "t", "p", None, Duration::from_secs(10));
        assert_eq!(config.endpoint.as_str(), SEND_ENDPOINT);
    }
}
