// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{http::header, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// Service name reported by `GET /`
pub const SERVICE_NAME: &str = "onnx-ocr-api";

/// OpenAPI document served at `GET /docs`
pub const OPENAPI_SPEC: &str = include_str!("../../docs/openapi.yaml");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceInfo {
    pub service: String,
    pub docs: String,
    pub healthz: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            docs: "/docs".to_string(),
            healthz: "/healthz".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

/// GET / - service discovery
pub async fn root_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

/// GET /healthz - liveness only, never touches the engine
pub async fn healthz_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /docs - OpenAPI document
pub async fn docs_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/yaml")], OPENAPI_SPEC)
}
