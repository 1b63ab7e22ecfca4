use std::io::Write;

use anyhow::{bail, Context};
use folio_core_contact_contracts::{ContactFormService, SubmitOutcome};
use folio_models::contact::ContactField;
use folio_notify_impl::ToastNotifier;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use super::{print_field_errors, print_toasts};

/// Fill in the contact form line by line.
///
/// An empty line keeps the current value of a field and `-` clears it. After a
/// failed submission the form keeps its input and can be sent again.
pub async fn run(
    form: &impl ContactFormService,
    notifier: &ToastNotifier,
    input: impl AsyncBufRead + Unpin,
) -> anyhow::Result<()> {
    let mut lines = input.lines();

    loop {
        for field in ContactField::ALL {
            let Some(line) = ask(&mut lines, &field_prompt(form, field)).await? else {
                form.dispose();
                bail!("Input closed before the message was sent");
            };
            match line.as_str() {
                "" => {}
                "-" => form.set_field(field, String::new())?,
                value => form.set_field(field, value.into())?,
            }
        }

        match form.submit_current().await {
            SubmitOutcome::Sent => {
                print_toasts(notifier);
                return Ok(());
            }
            SubmitOutcome::Invalid(errors) => {
                eprintln!("Please fix the following fields:");
                print_field_errors(&errors);
            }
            SubmitOutcome::Failed => {
                print_toasts(notifier);
                match ask(&mut lines, "Try again? [Y/n] ").await?.as_deref() {
                    Some(answer) if !answer.eq_ignore_ascii_case("n") => form.reset(),
                    _ => {
                        form.dispose();
                        bail!("Failed to send message");
                    }
                }
            }
            SubmitOutcome::Ignored | SubmitOutcome::Abandoned => {
                bail!("The contact form is no longer available")
            }
        }
    }
}

fn field_prompt(form: &impl ContactFormService, field: ContactField) -> String {
    let snapshot = form.snapshot();
    let label = match field {
        ContactField::Name => "Name",
        ContactField::Email => "Email",
        ContactField::Phone => "Phone (optional)",
        ContactField::Message => "Message",
    };
    match snapshot.input.get(field) {
        "" => format!("{label}: "),
        current => format!("{label} [{current}]: "),
    }
}

async fn ask<R: AsyncBufRead + Unpin>(
    lines: &mut Lines<R>,
    prompt: &str,
) -> anyhow::Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let line = lines.next_line().await.context("Failed to read from stdin")?;
    Ok(line.map(|l| l.trim().to_owned()))
}
