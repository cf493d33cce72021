use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use enrolldesk_enquiry::FieldErrors;
use thiserror::Error;

use crate::feedback::{Toast, ToastKind};
use crate::notify::NotifyError;
use crate::template::{render_with_status, ToastTemplate};

pub const MSG_FIX_FIELDS: &str = "Please fill in all required fields correctly.";
pub const MSG_IN_PROGRESS: &str =
    "Your previous submission is still being sent. Please wait a moment.";
pub const MSG_CALL_DIRECTLY: &str =
    "There was an issue sending your enquiry. Please try calling us directly.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("a submission for this form is already in flight")]
    SubmissionInProgress,

    #[error(transparent)]
    Notification(#[from] NotifyError),

    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, MSG_FIX_FIELDS),
            AppError::SubmissionInProgress => (StatusCode::CONFLICT, MSG_IN_PROGRESS),
            AppError::Notification(err) => {
                tracing::error!(error = %err, "notification dispatch failed");
                (StatusCode::BAD_GATEWAY, MSG_CALL_DIRECTLY)
            }
            AppError::Unknown(err) => {
                tracing::error!(error = %err, "unexpected failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again later.",
                )
            }
        };

        let toast = Toast {
            id: 0,
            kind: ToastKind::Error,
            message: message.to_owned(),
        };

        render_with_status(status, ToastTemplate { toast: &toast })
    }
}
