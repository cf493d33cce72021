//! Tests for the landing page, health probe, embedded assets and fallback.

mod common;

use axum::http::{header, StatusCode};
use common::{body_text, get, test_app, MockChannel};

#[tokio::test]
async fn landing_page_carries_both_forms() {
    let (app, _) = test_app(MockChannel::new());

    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains(r#"id="enquiryForm""#));
    assert!(body.contains(r#"id="modalEnquiryForm""#));
    assert!(body.contains(r#"id="enquiryModal""#));
    assert!(body.contains(r#"action="/enquiry""#));
    assert!(body.contains(r#"action="/enquiry/modal""#));
}

#[tokio::test]
async fn health_probe_reports_ok() {
    let (app, _) = test_app(MockChannel::new());

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains(r#""status":"ok""#));
}

#[tokio::test]
async fn stylesheet_is_served_with_its_mime_type() {
    let (app, _) = test_app(MockChannel::new());

    let response = get(app, "/static/styles.css").await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("text/css"));
}

#[tokio::test]
async fn missing_asset_is_not_found() {
    let (app, _) = test_app(MockChannel::new());
    let response = get(app, "/static/missing.css").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_renders_the_not_found_page() {
    let (app, _) = test_app(MockChannel::new());

    let response = get(app, "/nowhere").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_text(response).await;
    assert!(body.contains("Page Not Found"));
}
