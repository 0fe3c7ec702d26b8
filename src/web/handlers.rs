//! Route handlers: HTML form, JSON prediction API, model info, health.

use super::page::{self, PageView};
use super::AppState;
use crate::detector::TrainingReport;
use crate::error::DetectorError;
use crate::verdict::{Detection, Threshold};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    pub payload: Option<String>,
    #[serde(default)]
    pub threshold: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
    #[serde(default)]
    pub threshold: Option<f64>,
}

/// JSON error body with a status derived from the error kind.
pub struct ApiError(DetectorError);

impl From<DetectorError> for ApiError {
    fn from(e: DetectorError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DetectorError::NotReady => (StatusCode::SERVICE_UNAVAILABLE, "Model not ready"),
            DetectorError::InvalidThreshold(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Invalid threshold")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
        };
        let body = json!({
            "error": message,
            "details": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

impl AppState {
    fn view(&self, payload: String, threshold: Threshold) -> PageView {
        PageView {
            payload,
            threshold: threshold.value(),
            min_threshold: self.server.min_threshold,
            max_threshold: self.server.max_threshold,
            result: None,
            error: None,
        }
    }

    /// Unparsable input falls back to the default; parsed values are clamped to the slider range.
    pub fn form_threshold(&self, raw: Option<&str>) -> Threshold {
        let default = self.server.default_threshold;
        let value = raw
            .and_then(|s| s.trim().parse::<f64>().ok())
            .unwrap_or(default);
        Threshold::clamped(
            value,
            self.server.min_threshold,
            self.server.max_threshold,
            default,
        )
    }
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let threshold = state.form_threshold(None);
    Html(page::render(&state.view(String::new(), threshold)))
}

pub async fn submit(State(state): State<AppState>, Form(form): Form<PredictForm>) -> Response {
    let payload = form.payload.unwrap_or_default().trim().to_string();
    let threshold = state.form_threshold(form.threshold.as_deref());
    let mut view = state.view(payload, threshold);

    if view.payload.is_empty() {
        return Html(page::render(&view)).into_response();
    }

    match state.detector.get() {
        Ok(detector) => {
            view.result = Some(detector.detect(&view.payload, threshold));
            Html(page::render(&view)).into_response()
        }
        Err(e) => {
            warn!(error = %e, "form submitted before model was ready");
            view.error = Some(e.to_string());
            (StatusCode::SERVICE_UNAVAILABLE, Html(page::render(&view))).into_response()
        }
    }
}

pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<Detection>, ApiError> {
    let threshold = req.threshold.unwrap_or(state.server.default_threshold);
    let detection = state.detector.predict_label(&req.text, threshold)?;
    Ok(Json(detection))
}

pub async fn model_info(State(state): State<AppState>) -> Result<Json<TrainingReport>, ApiError> {
    let detector = state.detector.get()?;
    Ok(Json(detector.report().clone()))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    if state.detector.is_ready() {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "training" })),
        )
    }
}
