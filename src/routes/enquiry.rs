//! Submission handlers for the two lead-capture forms.
//!
//! One submission walks validate → dispatch admin alert → dispatch enquirer
//! confirmation → render the outcome fragment. The in-flight permit is held
//! for the whole walk and released by drop on every path.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum_extra::extract::Form;
use enrolldesk_enquiry::{check_field, validate_input, Enquiry, EnquiryInput, FormKind};
use serde::Deserialize;
use tracing::{error, info};

use crate::error::{AppError, MSG_CALL_DIRECTLY, MSG_FIX_FIELDS, MSG_IN_PROGRESS};
use crate::feedback::ToastKind;
use crate::routes::AppState;
use crate::template::{render, render_with_status, EnquiryFormTemplate, FieldStatusTemplate};

const MSG_PRIMARY_SUCCESS: &str =
    "Thank you for your enquiry! We will contact you within 24 hours.";
const MSG_MODAL_SUCCESS: &str = "Thank you for your interest! Our team will contact you shortly.";

/// POST /enquiry - primary contact form
pub async fn submit_primary(
    State(app): State<AppState>,
    Form(input): Form<EnquiryInput>,
) -> Result<Response, AppError> {
    submit(app, FormKind::Primary, input).await
}

/// POST /enquiry/modal - quick enrollment modal
pub async fn submit_modal(
    State(app): State<AppState>,
    Form(input): Form<EnquiryInput>,
) -> Result<Response, AppError> {
    submit(app, FormKind::Modal, input).await
}

async fn submit(app: AppState, kind: FormKind, input: EnquiryInput) -> Result<Response, AppError> {
    let Some(_permit) = app.gate.try_acquire(kind) else {
        app.toasts.raise(ToastKind::Error, MSG_IN_PROGRESS);
        return Err(AppError::SubmissionInProgress);
    };

    if let Err(errors) = validate_input(&input) {
        app.toasts.raise(ToastKind::Error, MSG_FIX_FIELDS);
        let form = EnquiryFormTemplate::empty(kind)
            .with_values(input)
            .with_errors(errors)
            .with_toast(app.toasts.current());
        return Ok(render_with_status(StatusCode::UNPROCESSABLE_ENTITY, form));
    }

    let enquiry = Enquiry::from_input(kind, input);
    info!(enquiry = %enquiry.id, form = kind.slug(), "processing enquiry submission");

    let admin = match app.dispatcher.notify_admin(&enquiry).await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(enquiry = %enquiry.id, error = %err, "enquiry submission failed");
            app.toasts.raise(ToastKind::Error, MSG_CALL_DIRECTLY);
            return Err(err.into());
        }
    };
    let confirmation = app.dispatcher.notify_user(&enquiry).await;

    info!(
        enquiry = %enquiry.id,
        form = kind.slug(),
        admin = ?admin,
        confirmation = ?confirmation,
        "enquiry dispatched"
    );

    let message = match kind {
        FormKind::Primary => MSG_PRIMARY_SUCCESS,
        FormKind::Modal => MSG_MODAL_SUCCESS,
    };
    app.toasts.raise(ToastKind::Success, message);

    let mut form = EnquiryFormTemplate::empty(kind).with_toast(app.toasts.current());
    if kind == FormKind::Modal {
        form = form.closing_modal();
    }
    Ok(render(form))
}

#[derive(Deserialize)]
pub struct FieldCheck {
    pub field: String,
    #[serde(default)]
    pub value: String,
}

/// POST /enquiry/field - re-validate a single field, fired on blur
pub async fn field_status(Form(check): Form<FieldCheck>) -> Response {
    let error = check_field(&check.field, &check.value);
    render(FieldStatusTemplate {
        field: check.field,
        error,
    })
}
