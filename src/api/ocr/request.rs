// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR upload extraction and validation

use axum::http::StatusCode;
use axum_extra::extract::multipart::{Multipart, MultipartError};
use bytes::Bytes;

use crate::api::errors::ApiError;

/// Multipart field carrying the image
pub const UPLOAD_FIELD: &str = "file";

/// An image upload taken from a multipart form
#[derive(Debug, Clone)]
pub struct OcrUpload {
    /// Declared content type of the part, if any
    pub content_type: Option<String>,
    /// Original file name, if any
    pub file_name: Option<String>,
    /// Raw bytes of the part
    pub data: Bytes,
}

impl OcrUpload {
    /// Read the `file` part from a multipart body.
    ///
    /// A declared non-image content type is rejected before the part body is
    /// read. Other parts are skipped.
    pub async fn from_multipart(multipart: &mut Multipart) -> Result<Self, ApiError> {
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some(UPLOAD_FIELD) {
                continue;
            }

            let content_type = field.content_type().map(str::to_string);
            validate_content_type(content_type.as_deref())?;

            let file_name = field.file_name().map(str::to_string);
            let data = field.bytes().await.map_err(multipart_error)?;

            return Ok(Self {
                content_type,
                file_name,
                data,
            });
        }

        Err(ApiError::Unprocessable(format!(
            "Field '{}' is required",
            UPLOAD_FIELD
        )))
    }
}

/// Accept a missing content type or any `image/*` type
pub fn validate_content_type(content_type: Option<&str>) -> Result<(), ApiError> {
    match content_type {
        Some(ct) if !ct.trim().to_ascii_lowercase().starts_with("image/") => Err(
            ApiError::BadRequest("Only image uploads are supported.".to_string()),
        ),
        _ => Ok(()),
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::Unprocessable(err.body_text())
    }
}
