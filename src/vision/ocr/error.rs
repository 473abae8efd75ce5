// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR pipeline error types

use std::time::Duration;
use thiserror::Error;

use crate::vision::ImageError;

#[derive(Debug, Error)]
pub enum OcrError {
    /// Engine could not be constructed at startup (missing model or runtime)
    #[error("Failed to initialize OCR engine: {0}")]
    Initialization(String),

    /// Caller supplied unusable input (empty upload, oversized upload)
    #[error("{0}")]
    InvalidInput(ImageError),

    /// Non-empty bytes that are not a decodable raster image
    #[error("{0}")]
    Decode(ImageError),

    /// Path-based lookup of a file that does not exist
    #[error("{0}")]
    NotFound(ImageError),

    /// The engine call itself failed
    #[error("{0}")]
    Engine(String),

    /// The engine lock was not acquired within the configured bound
    #[error("OCR engine busy: lock not acquired within {0:?}")]
    Busy(Duration),
}

impl From<ImageError> for OcrError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::EmptyData | ImageError::TooLarge(_, _) => OcrError::InvalidInput(err),
            ImageError::DecodeFailed(_) => OcrError::Decode(err),
            ImageError::NotFound(_) => OcrError::NotFound(err),
            ImageError::Io(_) => OcrError::Engine(err.to_string()),
        }
    }
}
