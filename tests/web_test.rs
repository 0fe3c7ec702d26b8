//! Router tests: form page, JSON API, readiness, driven through `oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqli_detector::{
    config::{FeaturesConfig, ModelConfig, ServerConfig},
    dataset::TrainingCorpus,
    detector::{Detector, DetectorCell},
    web::{self, AppState},
};
use std::sync::Arc;
use tower::ServiceExt;

fn trained_app() -> Router {
    let corpus: TrainingCorpus = [
        ("SELECT * FROM users", false),
        ("' OR 1=1 --", true),
        ("admin' --", true),
        ("SELECT name FROM products", false),
    ]
    .into_iter()
    .collect();
    let detector =
        Detector::fit(&corpus, &FeaturesConfig::default(), &ModelConfig::default()).unwrap();
    let cell = Arc::new(DetectorCell::from(detector));
    web::router(AppState::new(cell, ServerConfig::default()))
}

fn untrained_app() -> Router {
    web::router(AppState::new(
        Arc::new(DetectorCell::new()),
        ServerConfig::default(),
    ))
}

fn form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn index_shows_empty_form() {
    let response = trained_app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Waiting for input..."));
    assert!(html.contains(r#"value="0.80""#));
}

#[tokio::test]
async fn form_flags_injection() {
    let response = trained_app()
        .oneshot(form("payload=%27+OR+%271%27%3D%271&threshold=0.80"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("badge-sqli"));
    assert!(html.contains(">SQL Injection<"));
    assert!(html.contains("&#39; OR &#39;1&#39;=&#39;1"));
}

#[tokio::test]
async fn form_marks_benign() {
    let response = trained_app()
        .oneshot(form("payload=SELECT+id+FROM+orders&threshold=0.80"))
        .await
        .unwrap();
    let html = body_text(response).await;
    assert!(html.contains("badge-benign"));
    assert!(html.contains(">Benign<"));
}

#[tokio::test]
async fn form_threshold_defaults_and_clamps() {
    let html = body_text(
        trained_app()
            .oneshot(form("payload=abc&threshold=not-a-number"))
            .await
            .unwrap(),
    )
    .await;
    assert!(html.contains(r#"value="0.80""#));

    let html = body_text(
        trained_app()
            .oneshot(form("payload=abc&threshold=0.2"))
            .await
            .unwrap(),
    )
    .await;
    assert!(html.contains(r#"value="0.50""#));

    let html = body_text(
        trained_app()
            .oneshot(form("payload=abc&threshold=7"))
            .await
            .unwrap(),
    )
    .await;
    assert!(html.contains(r#"value="0.99""#));
}

#[tokio::test]
async fn blank_payload_is_not_classified() {
    let html = body_text(trained_app().oneshot(form("payload=+++")).await.unwrap()).await;
    assert!(html.contains("Waiting for input..."));
    assert!(!html.contains("SQLi probability"));
}

#[tokio::test]
async fn api_predict_returns_detection() {
    let response = trained_app()
        .oneshot(json_request(
            "/api/predict",
            serde_json::json!({ "text": "' OR '1'='1", "threshold": 0.8 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let v: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(v["label"], "SQL Injection");
    assert!(v["probability"].as_f64().unwrap() >= 0.8);
    assert_eq!(v["threshold"].as_f64().unwrap(), 0.8);
    assert!(v["id"].is_string());
}

#[tokio::test]
async fn api_predict_uses_default_threshold() {
    let response = trained_app()
        .oneshot(json_request(
            "/api/predict",
            serde_json::json!({ "text": "SELECT id FROM orders" }),
        ))
        .await
        .unwrap();
    let v: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(v["label"], "Benign");
    assert_eq!(v["threshold"].as_f64().unwrap(), 0.8);
}

#[tokio::test]
async fn api_rejects_out_of_range_threshold() {
    let response = trained_app()
        .oneshot(json_request(
            "/api/predict",
            serde_json::json!({ "text": "x", "threshold": 1.5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn model_info_and_health_when_ready() {
    let app = trained_app();
    let response = app.clone().oneshot(get("/api/model")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let v: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(v["rows"], 4);
    assert_eq!(v["loss"], "logistic");

    let response = app.oneshot(get("/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let v: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(v["status"], "ready");
}

#[tokio::test]
async fn untrained_detector_reports_unavailable() {
    let app = untrained_app();

    let response = app.clone().oneshot(get("/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = app.clone().oneshot(form("payload=abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = app
        .clone()
        .oneshot(json_request("/api/predict", serde_json::json!({ "text": "abc" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = app.oneshot(get("/api/model")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
