use folio_models::contact::FieldErrors;
use folio_notify_contracts::NotificationKind;
use folio_notify_impl::ToastNotifier;

pub mod prompt;
pub mod send;

fn print_field_errors(errors: &FieldErrors) {
    for (field, error) in errors.iter() {
        eprintln!("  {field}: {}", error.message);
    }
}

fn print_toasts(notifier: &ToastNotifier) {
    for notification in notifier.active() {
        let prefix = match notification.kind {
            NotificationKind::Success => "✔",
            NotificationKind::Failure => "✘",
        };
        println!("{prefix} {}", notification.message);
    }
}
