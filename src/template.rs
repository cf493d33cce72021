use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use enrolldesk_enquiry::{EnquiryInput, FieldErrors, FormKind};

use crate::feedback::Toast;

pub fn render<T: Template>(template: T) -> Response {
    render_with_status(StatusCode::OK, template)
}

pub fn render_with_status<T: Template>(status: StatusCode, template: T) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to render template");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to render template",
            )
                .into_response()
        }
    }
}

/// One lead-capture form, rendered either into the landing page or as the
/// fragment a submission swaps back in.
#[derive(Template)]
#[template(path = "partials/enquiry-form.html")]
pub struct EnquiryFormTemplate {
    pub form_id: &'static str,
    pub action: &'static str,
    pub submit_label: &'static str,
    pub values: EnquiryInput,
    pub errors: FieldErrors,
    pub toast: Option<Toast>,
    pub close_modal: bool,
}

impl EnquiryFormTemplate {
    pub fn empty(kind: FormKind) -> Self {
        let (form_id, action, submit_label) = match kind {
            FormKind::Primary => ("enquiryForm", "/enquiry", "Submit Enquiry"),
            FormKind::Modal => ("modalEnquiryForm", "/enquiry/modal", "Enroll Now"),
        };
        Self {
            form_id,
            action,
            submit_label,
            values: EnquiryInput::default(),
            errors: FieldErrors::default(),
            toast: None,
            close_modal: false,
        }
    }

    pub fn with_values(mut self, values: EnquiryInput) -> Self {
        self.values = values;
        self
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_toast(mut self, toast: Option<Toast>) -> Self {
        self.toast = toast;
        self
    }

    pub fn closing_modal(mut self) -> Self {
        self.close_modal = true;
        self
    }

    /// CSS class for an input that failed validation.
    pub fn field_class(&self, field: &str) -> &'static str {
        if self.errors.get(field).is_some() {
            "invalid"
        } else {
            ""
        }
    }

    /// `selected` attribute for the course option matching the submitted value.
    pub fn selected(&self, option: &str) -> &'static str {
        if self.values.course == option {
            "selected"
        } else {
            ""
        }
    }
}

#[derive(Template)]
#[template(path = "partials/toast.html")]
pub struct ToastTemplate<'a> {
    pub toast: &'a Toast,
}

#[derive(Template)]
#[template(path = "partials/field-status.html")]
pub struct FieldStatusTemplate {
    pub field: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    pub toast: Option<Toast>,
    pub primary_form: String,
    pub modal_form: String,
}

#[derive(Template)]
#[template(path = "pages/404.html")]
pub struct NotFoundTemplate;
