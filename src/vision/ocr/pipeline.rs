// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Decode-then-recognize entry points

use std::path::Path;

use super::error::OcrError;
use super::guard::EngineGuard;
use super::normalize::Detection;
use crate::vision::image_utils::{decode_image_bytes, decode_image_file};

/// Decode raw upload bytes and run OCR on them
///
/// Validation happens before the engine lock is taken, so rejected input never
/// queues behind in-flight recognitions.
pub async fn run_ocr_from_bytes(
    engine: &EngineGuard,
    image_bytes: &[u8],
    max_size: usize,
) -> Result<Vec<Detection>, OcrError> {
    let (pixels, _info) = decode_image_bytes(image_bytes, max_size)?;
    engine.recognize(pixels).await
}

/// Read an image from disk and run OCR on it
pub async fn run_ocr_from_path(
    engine: &EngineGuard,
    image_path: &Path,
) -> Result<Vec<Detection>, OcrError> {
    let pixels = decode_image_file(image_path)?;
    engine.recognize(pixels).await
}
