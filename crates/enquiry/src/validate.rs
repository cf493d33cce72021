use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::EnquiryInput;

const MSG_REQUIRED: &str = "This field is required";
const MSG_EMAIL: &str = "Please enter a valid email address";
const MSG_PHONE: &str = "Please enter a valid phone number";

// local@domain with at least one dot after the @, no whitespace anywhere.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

// Optional leading +, then at least ten digits/spaces/hyphens/parentheses.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").expect("phone pattern"));

/// Field name to human-readable reason, for every field that failed.
/// All fields are checked before any error is reported, so a single
/// submission surfaces every problem at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();
        for (field, failures) in errors.field_errors() {
            let Some(first) = failures.first() else {
                continue;
            };
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string());
            fields.insert(field.to_string(), message);
        }
        Self(fields)
    }
}

/// Validate a full submission, collecting every field failure.
pub fn validate_input(input: &EnquiryInput) -> Result<(), FieldErrors> {
    input.validate().map_err(FieldErrors::from)
}

/// Re-run the rules for a single field, as fired on blur events.
/// Fields without rules (course, message) always pass.
pub fn check_field(field: &str, value: &str) -> Option<String> {
    let result = match field {
        "name" => required(value),
        "email" => email_shape(value),
        "phone" => phone_shape(value),
        _ => return None,
    };

    result
        .err()
        .and_then(|e| e.message.map(|m| m.to_string()))
}

pub(crate) fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(MSG_REQUIRED.into()));
    }
    Ok(())
}

pub(crate) fn email_shape(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("required").with_message(MSG_REQUIRED.into()));
    }
    if !EMAIL_RE.is_match(trimmed) {
        return Err(ValidationError::new("email").with_message(MSG_EMAIL.into()));
    }
    Ok(())
}

pub(crate) fn phone_shape(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("required").with_message(MSG_REQUIRED.into()));
    }
    if !PHONE_RE.is_match(trimmed) {
        return Err(ValidationError::new("phone").with_message(MSG_PHONE.into()));
    }
    Ok(())
}
