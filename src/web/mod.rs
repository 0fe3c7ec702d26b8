//! HTTP surface over a shared [`DetectorCell`].
//!
//! - `GET /`, `POST /` — HTML tester form
//! - `POST /api/predict` — JSON `{ "text", "threshold"? }` → detection
//! - `GET /api/model` — training report
//! - `GET /healthz` — readiness

mod handlers;
mod page;

pub use handlers::{ApiError, PredictForm, PredictRequest};
pub use page::{render, PageView};

use crate::config::ServerConfig;
use crate::detector::DetectorCell;
use crate::error::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<DetectorCell>,
    pub server: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(detector: Arc<DetectorCell>, server: ServerConfig) -> Self {
        Self {
            detector,
            server: Arc::new(server),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .route("/api/predict", post(handlers::predict))
        .route("/api/model", get(handlers::model_info))
        .route("/healthz", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl+C.
pub async fn serve(config: &ServerConfig, detector: Arc<DetectorCell>) -> Result<()> {
    let app = router(AppState::new(detector, config.clone()));
    let listener = TcpListener::bind(config.bind.as_str()).await?;
    info!(bind = %config.bind, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
