use email_address::{EmailAddress, Options};

use super::{
    ContactField, ContactInput, ContactMessageContent, ContactName, ContactPhone, FieldError,
    FieldErrorKind, FieldErrors, ValidatedContact,
};

/// Checks every field of `input` and either produces a [`ValidatedContact`]
/// or reports all failing fields at once.
pub fn validate(input: &ContactInput) -> Result<ValidatedContact, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = check(
        &mut errors,
        ContactField::Name,
        ContactName::try_new(input.name.clone()),
    );
    let email = check(
        &mut errors,
        ContactField::Email,
        parse_email(input.email.trim()),
    );
    // an empty or absent phone number is always valid
    let phone = match input.phone.as_deref().map(str::trim) {
        None | Some("") => Some(None),
        Some(phone) => check(
            &mut errors,
            ContactField::Phone,
            ContactPhone::try_new(phone.to_owned()),
        )
        .map(Some),
    };
    let message = check(
        &mut errors,
        ContactField::Message,
        ContactMessageContent::try_new(input.message.clone()),
    );

    match (name, email, phone, message) {
        (Some(name), Some(email), Some(phone), Some(message)) => Ok(ValidatedContact {
            name,
            email,
            phone,
            message,
        }),
        _ => Err(errors),
    }
}

/// Accepts plain `local-part@domain.tld` addresses only.
fn parse_email(email: &str) -> Result<EmailAddress, email_address::Error> {
    let options = Options::default()
        .without_display_text()
        .without_domain_literal()
        .with_required_tld();
    let email = EmailAddress::parse_with_options(email, options)?;
    if email.local_part().starts_with('"') {
        return Err(email_address::Error::InvalidCharacter);
    }
    Ok(email)
}

fn check<T, E>(errors: &mut FieldErrors, field: ContactField, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(_) => {
            errors.insert(field, rule(field));
            None
        }
    }
}

const fn rule(field: ContactField) -> FieldError {
    match field {
        ContactField::Name => FieldError {
            kind: FieldErrorKind::TooShort,
            message: "Name is required",
        },
        ContactField::Email => FieldError {
            kind: FieldErrorKind::InvalidFormat,
            message: "Invalid email address",
        },
        ContactField::Phone => FieldError {
            kind: FieldErrorKind::InvalidFormat,
            message: "Invalid phone number",
        },
        ContactField::Message => FieldError {
            kind: FieldErrorKind::TooShort,
            message: "Message should be at least 5 characters",
        },
    }
}
