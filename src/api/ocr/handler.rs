// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::multipart::{Multipart, MultipartRejection};
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::request::OcrUpload;
use super::response::OcrResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::vision::ocr::{run_ocr_from_bytes, OcrError};

/// POST /ocr - Extract text from an uploaded image
///
/// # Request
/// `multipart/form-data` with the image in the `file` field.
///
/// # Response
/// - `detections`: `{text, score, box}` records in engine order
///
/// # Errors
/// - 400 Bad Request: non-image content type, empty or undecodable image
/// - 413 Payload Too Large: upload exceeds the configured bound
/// - 422 Unprocessable Entity: malformed multipart body or missing `file`
/// - 503 Service Unavailable: engine lock wait bound exceeded
/// - 500 Internal Server Error: OCR processing failed
pub async fn ocr_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<OcrResponse>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        warn!("OCR request is not multipart: {}", rejection.body_text());
        ApiError::Unprocessable(rejection.body_text())
    })?;

    let upload = OcrUpload::from_multipart(&mut multipart)
        .await
        .inspect_err(|e| warn!("OCR upload rejected: {}", e))?;

    debug!(
        "OCR request received: {} bytes, content type {:?}, file {:?}",
        upload.data.len(),
        upload.content_type,
        upload.file_name
    );

    let start = Instant::now();
    let detections = run_ocr_from_bytes(&state.engine, &upload.data, state.max_upload_bytes)
        .await
        .map_err(|e| {
            match &e {
                OcrError::Engine(_) | OcrError::Initialization(_) => {
                    error!("OCR processing failed: {}", e)
                }
                _ => warn!("OCR request failed: {}", e),
            }
            ApiError::from(e)
        })?;

    info!(
        "OCR complete: {} detections in {}ms",
        detections.len(),
        start.elapsed().as_millis()
    );

    Ok(Json(OcrResponse::new(detections)))
}
