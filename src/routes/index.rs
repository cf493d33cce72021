use askama::Template;
use axum::extract::State;
use axum::response::Response;
use enrolldesk_enquiry::FormKind;

use crate::routes::AppState;
use crate::template::{render, EnquiryFormTemplate, IndexTemplate};

/// GET / - landing page with the primary form and the quick-enrol modal
pub async fn page(State(app): State<AppState>) -> Response {
    let primary_form = EnquiryFormTemplate::empty(FormKind::Primary)
        .render()
        .unwrap_or_default();
    let modal_form = EnquiryFormTemplate::empty(FormKind::Modal)
        .render()
        .unwrap_or_default();

    render(IndexTemplate {
        toast: app.toasts.current(),
        primary_form,
        modal_form,
    })
}
