use serde::Deserialize;
use strum::{AsRefStr, Display};
use ulid::Ulid;
use validator::Validate;

use crate::validate::{email_shape, phone_shape, required};

/// Message recorded when the quick-enrol modal is submitted without one.
pub const DEFAULT_MODAL_MESSAGE: &str = "Quick enrollment request";

/// Which of the two lead-capture forms produced a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum FormKind {
    #[strum(serialize = "Main contact form")]
    Primary,
    #[strum(serialize = "Quick enrollment modal")]
    Modal,
}

impl FormKind {
    /// Stable identifier used in logs and on the bridge wire.
    pub fn slug(&self) -> &'static str {
        match self {
            FormKind::Primary => "main-form",
            FormKind::Modal => "modal-form",
        }
    }
}

/// Raw form fields as posted by either form. Checked by [`crate::validate_input`]
/// before an [`Enquiry`] is built from them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EnquiryInput {
    #[serde(default)]
    #[validate(custom(function = required))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = email_shape))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = phone_shape))]
    pub phone: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub message: String,
}

/// One validated enquiry. Built from an [`EnquiryInput`], owned by the
/// submission that created it and handed by value to the dispatcher.
/// Never persisted.
#[derive(Debug, Clone)]
pub struct Enquiry {
    pub id: String,
    pub kind: FormKind,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: Option<String>,
    pub message: Option<String>,
}

impl Enquiry {
    pub fn from_input(kind: FormKind, input: EnquiryInput) -> Self {
        let course = non_blank(&input.course);
        let message = non_blank(&input.message).or_else(|| match kind {
            FormKind::Modal => Some(DEFAULT_MODAL_MESSAGE.to_owned()),
            FormKind::Primary => None,
        });

        Self {
            id: Ulid::new().to_string(),
            kind,
            name: input.name.trim().to_owned(),
            email: input.email.trim().to_owned(),
            phone: input.phone.trim().to_owned(),
            course,
            message,
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
