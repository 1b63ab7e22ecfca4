use std::{collections::BTreeMap, fmt, sync::LazyLock};

use email_address::EmailAddress;
use regex::Regex;

use crate::macros::nutype_string;

mod validate;

pub use validate::validate;

pub static CONTACT_PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 \-]{7,15}$").unwrap());

/// Raw, user-editable contents of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

impl ContactInput {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.phone.as_deref().unwrap_or_default().is_empty()
            && self.message.is_empty()
    }

    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => self.phone.as_deref().unwrap_or_default(),
            ContactField::Message => &self.message,
        }
    }

    /// Replaces the value of a single field. An empty phone number is stored
    /// as absent.
    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Phone => self.phone = (!value.is_empty()).then_some(value),
            ContactField::Message => self.message = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

nutype_string!(ContactName(sanitize(trim), validate(len_char_min = 2),));
nutype_string!(ContactPhone(
    sanitize(trim),
    validate(regex = CONTACT_PHONE_REGEX),
));
nutype_string!(ContactMessageContent(
    sanitize(trim),
    validate(len_char_min = 5),
));

/// A contact payload that satisfies every field rule.
///
/// The only way to obtain one is [`validate`], so holding a
/// `ValidatedContact` is proof that the input it came from was valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedContact {
    name: ContactName,
    email: EmailAddress,
    phone: Option<ContactPhone>,
    message: ContactMessageContent,
}

impl ValidatedContact {
    pub fn name(&self) -> &ContactName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn phone(&self) -> Option<&ContactPhone> {
        self.phone.as_ref()
    }

    pub fn message(&self) -> &ContactMessageContent {
        &self.message
    }
}

impl From<ValidatedContact> for ContactInput {
    fn from(value: ValidatedContact) -> Self {
        Self {
            name: value.name.into_inner(),
            email: value.email.as_str().into(),
            phone: value.phone.map(ContactPhone::into_inner),
            message: value.message.into_inner(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    TooShort,
    InvalidFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: &'static str,
}

/// Validation failures keyed by field. A field only has an entry while it is
/// invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<ContactField, FieldError>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: ContactField) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn message(&self, field: ContactField) -> Option<&'static str> {
        self.get(field).map(|error| error.message)
    }

    pub fn contains(&self, field: ContactField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &FieldError)> {
        self.0.iter().map(|(&field, error)| (field, error))
    }

    fn insert(&mut self, field: ContactField, error: FieldError) {
        self.0.insert(field, error);
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {}", error.message)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// No submission attempted, or the previous result was cleared.
    #[default]
    Idle,
    /// A relay call is in flight. The form is read-only.
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    pub fn is_submitting(self) -> bool {
        self == Self::Submitting
    }
}
