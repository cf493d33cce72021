use axum::http::StatusCode;
use axum::response::Response;

use crate::bridge::BackendBridge;
use crate::config::Config;
use crate::feedback::ToastHub;
use crate::gate::SubmissionGate;
use crate::notify::{channel_from_config, Dispatcher};
use crate::template::{render_with_status, NotFoundTemplate};

pub mod assets;
pub mod enquiry;
pub mod health;
pub mod index;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub dispatcher: Dispatcher,
    pub toasts: ToastHub,
    pub gate: SubmissionGate,
}

impl AppState {
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let channel = channel_from_config(&config.notify)?;
        let bridge = BackendBridge::new(&config.bridge)?;
        let dispatcher = Dispatcher::new(channel, bridge, config.notify.clone());

        Ok(Self {
            config,
            dispatcher,
            toasts: ToastHub::default(),
            gate: SubmissionGate::default(),
        })
    }
}

pub async fn fallback() -> Response {
    render_with_status(StatusCode::NOT_FOUND, NotFoundTemplate)
}
