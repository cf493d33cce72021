//! Shared helpers for the HTTP-level tests: a recording notification
//! channel and an app wired with test configuration.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use enrolldesk::bridge::BackendBridge;
use enrolldesk::config::{BridgeConfig, Config, NotifyConfig, ObservabilityConfig, ServerConfig};
use enrolldesk::feedback::ToastHub;
use enrolldesk::gate::SubmissionGate;
use enrolldesk::notify::{Channel, Dispatcher, OutboundEmail};
use enrolldesk::{router, AppState};

pub struct MockChannel {
    pub sent: Mutex<Vec<OutboundEmail>>,
    fail_to: Option<String>,
}

impl MockChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail_to: None,
        })
    }

    /// A channel that rejects any message addressed to `recipient`.
    pub fn failing_for(recipient: &str) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail_to: Some(recipient.to_owned()),
        })
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Channel for MockChannel {
    async fn send(&self, email: OutboundEmail) -> anyhow::Result<()> {
        let failing = self.fail_to.as_deref() == Some(email.to.as_str());
        self.sent.lock().unwrap().push(email);
        if failing {
            anyhow::bail!("mock channel rejected message");
        }
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        notify: NotifyConfig::default(),
        bridge: BridgeConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

pub fn test_app(channel: Arc<MockChannel>) -> (Router, AppState) {
    let config = test_config();
    let bridge = BackendBridge::new(&config.bridge).unwrap();
    let dispatcher = Dispatcher::new(channel, bridge, config.notify.clone());
    let state = AppState {
        config,
        dispatcher,
        toasts: ToastHub::default(),
        gate: SubmissionGate::default(),
    };
    (router(state.clone()), state)
}

pub async fn post_form(app: Router, path: &str, pairs: &[(&str, &str)]) -> Response<Body> {
    let body = serde_urlencoded::to_string(pairs).unwrap();
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub const VALID_FORM: &[(&str, &str)] = &[
    ("name", "Priya Sharma"),
    ("email", "priya@example.com"),
    ("phone", "+91 98765 43210"),
    ("course", "CFA"),
    ("message", "When does the next batch start?"),
];
