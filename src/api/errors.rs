// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vision::ocr::OcrError;
use crate::vision::ImageError;

/// JSON error body: `{"detail": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Unsupported content type, empty upload, undecodable image
    BadRequest(String),
    /// Upload exceeds the configured size bound
    PayloadTooLarge(String),
    /// Malformed multipart body or missing `file` field
    Unprocessable(String),
    /// Engine lock not acquired within the configured bound
    ServiceUnavailable(String),
    /// Engine failure
    InternalError(String),
}

impl ApiError {
    pub fn detail(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::Unprocessable(msg)
            | ApiError::ServiceUnavailable(msg)
            | ApiError::InternalError(msg) => msg,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            detail: self.detail().to_string(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::PayloadTooLarge(_) => 413,
            ApiError::Unprocessable(_) => 422,
            ApiError::ServiceUnavailable(_) => 503,
            ApiError::InternalError(_) => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            ApiError::Unprocessable(msg) => write!(f, "Unprocessable request: {}", msg),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<OcrError> for ApiError {
    fn from(err: OcrError) -> Self {
        match err {
            OcrError::InvalidInput(ImageError::TooLarge(..)) => {
                ApiError::PayloadTooLarge(err.to_string())
            }
            OcrError::InvalidInput(_) | OcrError::Decode(_) | OcrError::NotFound(_) => {
                ApiError::BadRequest(err.to_string())
            }
            OcrError::Busy(_) => ApiError::ServiceUnavailable("OCR engine busy".to_string()),
            OcrError::Engine(msg) => ApiError::InternalError(format!("OCR failed: {}", msg)),
            OcrError::Initialization(msg) => {
                ApiError::InternalError(format!("OCR failed: {}", msg))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}
