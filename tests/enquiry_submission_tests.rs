//! End-to-end tests for the two enquiry submission routes.

mod common;

use axum::http::StatusCode;
use common::{body_text, post_form, test_app, MockChannel, VALID_FORM};
use enrolldesk::config::NotifyConfig;
use enrolldesk_enquiry::FormKind;

#[tokio::test]
async fn valid_primary_submission_notifies_admin_then_enquirer() {
    let channel = MockChannel::new();
    let (app, _) = test_app(channel.clone());

    let response = post_form(app, "/enquiry", VALID_FORM).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Thank you for your enquiry! We will contact you within 24 hours."));
    assert!(!body.contains("data-modal-close"));

    let sent = channel.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, NotifyConfig::default().admin_email);
    assert_eq!(sent[1].to, "priya@example.com");
}

#[tokio::test]
async fn successful_submission_renders_an_empty_form() {
    let channel = MockChannel::new();
    let (app, _) = test_app(channel);

    let body = body_text(post_form(app, "/enquiry", VALID_FORM).await).await;
    assert!(body.contains(r#"id="enquiryForm""#));
    assert!(!body.contains("Priya Sharma"));
    assert!(!body.contains("priya@example.com"));
}

#[tokio::test]
async fn invalid_submission_reports_every_failing_field() {
    let channel = MockChannel::new();
    let (app, _) = test_app(channel.clone());

    let response = post_form(
        app,
        "/enquiry",
        &[("name", "  "), ("email", "not-an-email"), ("phone", "12345")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_text(response).await;
    assert!(body.contains("This field is required"));
    assert!(body.contains("Please enter a valid email address"));
    assert!(body.contains("Please enter a valid phone number"));
    assert!(body.contains("Please fill in all required fields correctly."));

    assert_eq!(channel.sent_count(), 0);
}

#[tokio::test]
async fn invalid_submission_echoes_the_submitted_values() {
    let channel = MockChannel::new();
    let (app, _) = test_app(channel);

    let body = body_text(
        post_form(
            app,
            "/enquiry",
            &[
                ("name", "Priya Sharma"),
                ("email", "broken"),
                ("phone", "+91 98765 43210"),
                ("course", "CFA"),
            ],
        )
        .await,
    )
    .await;

    assert!(body.contains(r#"value="Priya Sharma""#));
    assert!(body.contains(r#"value="broken""#));
    assert!(body.contains(r#"value="CFA" selected"#));
}

#[tokio::test]
async fn admin_channel_failure_fails_the_submission() {
    let admin = NotifyConfig::default().admin_email;
    let channel = MockChannel::failing_for(&admin);
    let (app, _) = test_app(channel.clone());

    let response = post_form(app, "/enquiry", VALID_FORM).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_text(response).await;
    assert!(body.contains("Please try calling us directly."));

    // The confirmation leg never ran.
    assert_eq!(channel.sent_count(), 1);
}

#[tokio::test]
async fn confirmation_failure_does_not_fail_the_submission() {
    let channel = MockChannel::failing_for("priya@example.com");
    let (app, _) = test_app(channel.clone());

    let response = post_form(app, "/enquiry", VALID_FORM).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Thank you for your enquiry!"));
    assert_eq!(channel.sent_count(), 2);
}

#[tokio::test]
async fn modal_submission_closes_the_modal_on_success() {
    let channel = MockChannel::new();
    let (app, _) = test_app(channel);

    let response = post_form(app, "/enquiry/modal", VALID_FORM).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Thank you for your interest! Our team will contact you shortly."));
    assert!(body.contains("data-modal-close"));
}

#[tokio::test]
async fn modal_without_message_records_the_default_one() {
    let channel = MockChannel::new();
    let (app, _) = test_app(channel.clone());

    post_form(
        app,
        "/enquiry/modal",
        &[
            ("name", "Priya Sharma"),
            ("email", "priya@example.com"),
            ("phone", "+91 98765 43210"),
        ],
    )
    .await;

    let sent = channel.sent.lock().unwrap();
    assert!(sent[0].body.contains("Quick enrollment request"));
}

#[tokio::test]
async fn in_flight_submission_is_rejected_with_conflict() {
    let channel = MockChannel::new();
    let (app, state) = test_app(channel.clone());

    let _held = state.gate.try_acquire(FormKind::Primary).unwrap();

    let response = post_form(app, "/enquiry", VALID_FORM).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(channel.sent_count(), 0);
}

#[tokio::test]
async fn forms_guard_independently() {
    let channel = MockChannel::new();
    let (app, state) = test_app(channel);

    // A primary submission in flight does not block the modal form.
    let _held = state.gate.try_acquire(FormKind::Primary).unwrap();

    let response = post_form(app, "/enquiry/modal", VALID_FORM).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn blur_check_returns_the_field_error_fragment() {
    let channel = MockChannel::new();
    let (app, _) = test_app(channel);

    let body = body_text(
        post_form(
            app,
            "/enquiry/field",
            &[("field", "email"), ("value", "nope")],
        )
        .await,
    )
    .await;

    assert!(body.contains(r#"data-field-error="email""#));
    assert!(body.contains("Please enter a valid email address"));
}

#[tokio::test]
async fn blur_check_passes_a_valid_value() {
    let channel = MockChannel::new();
    let (app, _) = test_app(channel);

    let body = body_text(
        post_form(
            app,
            "/enquiry/field",
            &[("field", "phone"), ("value", "+91 98765 43210")],
        )
        .await,
    )
    .await;

    assert!(body.contains(r#"data-field-ok="phone""#));
    assert!(!body.contains("data-field-error"));
}
