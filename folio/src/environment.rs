use folio_config::Config;
use folio_core_contact_impl::ContactFormServiceImpl;
use folio_extern_impl::emailjs::{EmailJsRelayConfig, EmailJsRelayServiceImpl};
use folio_notify_impl::{ToastNotifier, ToastNotifierConfig};

pub type ContactForm = ContactFormServiceImpl<EmailJsRelayServiceImpl, ToastNotifier>;

/// The services of a single contact form, wired from the configuration.
#[derive(Debug)]
pub struct Environment {
    pub contact_form: ContactForm,
    pub notifier: ToastNotifier,
}

impl Environment {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let relay_config = EmailJsRelayConfig::new(
            config.relay.endpoint_override.clone(),
            &config.relay.service_id,
            &config.relay.template_id,
            &config.relay.public_key,
            config.relay.private_key.as_deref(),
            config.relay.timeout.into(),
        );
        let relay = EmailJsRelayServiceImpl::new(relay_config)?;

        let notifier = ToastNotifier::new(ToastNotifierConfig {
            duration: config.notify.duration.into(),
        });

        Ok(Self {
            contact_form: ContactFormServiceImpl::new(relay, notifier.clone()),
            notifier,
        })
    }
}
