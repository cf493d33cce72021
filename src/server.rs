//! Router assembly and the serve loop.

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::routes::{self, AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index::page))
        .route("/health", get(routes::health::health))
        .route("/enquiry", post(routes::enquiry::submit_primary))
        .route("/enquiry/modal", post(routes::enquiry::submit_modal))
        .route("/enquiry/field", post(routes::enquiry::field_status))
        .route("/static/{*path}", get(routes::assets::serve))
        .fallback(routes::fallback)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    let host = host_override.unwrap_or_else(|| config.server.host.clone());
    let port = port_override.unwrap_or(config.server.port);

    let state = AppState::from_config(config)?;
    let app = router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
