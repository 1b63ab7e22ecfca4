use anyhow::bail;
use clap::Args;
use folio_core_contact_contracts::{ContactFormService, SubmitOutcome};
use folio_models::contact::ContactInput;
use folio_notify_impl::ToastNotifier;

use super::{print_field_errors, print_toasts};

#[derive(Debug, Args)]
pub struct SendCommand {
    /// Your full name
    #[arg(long)]
    name: String,
    /// Address the reply should be sent to
    #[arg(long)]
    email: String,
    /// Optional phone number
    #[arg(long)]
    phone: Option<String>,
    /// The message itself
    #[arg(long)]
    message: String,
}

impl SendCommand {
    pub fn new(name: &str, email: &str, phone: Option<&str>, message: &str) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.map(Into::into),
            message: message.into(),
        }
    }

    pub async fn invoke(
        self,
        form: &impl ContactFormService,
        notifier: &ToastNotifier,
    ) -> anyhow::Result<()> {
        let input = ContactInput {
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
        };

        let outcome = form.submit(input).await;
        print_toasts(notifier);

        match outcome {
            SubmitOutcome::Sent => Ok(()),
            SubmitOutcome::Invalid(errors) => {
                eprintln!("The message was not sent:");
                print_field_errors(&errors);
                bail!("Invalid contact form input")
            }
            SubmitOutcome::Failed => bail!("Failed to send message"),
            SubmitOutcome::Ignored | SubmitOutcome::Abandoned => {
                bail!("The contact form is no longer available")
            }
        }
    }
}
