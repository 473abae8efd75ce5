// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route registration tests
//!
//! These tests verify that:
//! - `/`, `/healthz` and `/docs` answer GET with the documented bodies
//! - `/ocr` only accepts POST
//! - Unknown paths are 404

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use fabstir_ocr_node::{
    api::http_server::{create_app, AppState},
    vision::ocr::EngineGuard,
};
use tower::util::ServiceExt; // for `oneshot`

use crate::common::{json_body, DimensionsEngine};

fn app() -> Router {
    let engine = EngineGuard::new(Box::new(DimensionsEngine::new()), None);
    create_app(AppState::new(engine, 1024 * 1024))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_root_route() {
    let response = app().oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({
            "service": "onnx-ocr-api",
            "docs": "/docs",
            "healthz": "/healthz"
        })
    );
}

#[tokio::test]
async fn test_healthz_route() {
    let response = app().oneshot(get("/healthz")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "status": "ok" })
    );
}

#[tokio::test]
async fn test_docs_route_serves_openapi() {
    let response = app().oneshot(get("/docs")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/yaml"
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("/ocr:"));
    assert!(text.contains("multipart/form-data"));
}

#[tokio::test]
async fn test_ocr_route_rejects_get() {
    let response = app().oneshot(get("/ocr")).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_route() {
    let response = app().oneshot(get("/v1/ocr")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
