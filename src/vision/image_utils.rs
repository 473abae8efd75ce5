// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image loading and validation ahead of OCR

use image::{ImageFormat, RgbImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default maximum upload size (20MB)
pub const DEFAULT_MAX_IMAGE_SIZE: usize = 20 * 1024 * 1024;

/// Custom error types for image processing
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Empty image data")]
    EmptyData,

    #[error("Image data is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    /// Carries the decoder's reason for logs; the message stays generic
    #[error("Failed to decode image")]
    DecodeFailed(String),

    #[error("Image not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),
}

/// Image information extracted during loading
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Detected format
    pub format: ImageFormat,
    /// Size in bytes
    pub size_bytes: usize,
}

/// Decode raw image bytes into a 3-channel RGB buffer.
///
/// Uses the default size limit. See [`decode_image_bytes`] for a custom limit.
pub fn decode_and_validate(bytes: &[u8]) -> Result<RgbImage, ImageError> {
    decode_image_bytes(bytes, DEFAULT_MAX_IMAGE_SIZE).map(|(image, _)| image)
}

/// Decode raw image bytes (for multipart uploads)
///
/// # Returns
/// * `Ok((RgbImage, ImageInfo))` - Decoded RGB pixels (alpha dropped) and metadata
/// * `Err(ImageError)` - Empty, oversized, or undecodable input
pub fn decode_image_bytes(
    bytes: &[u8],
    max_size: usize,
) -> Result<(RgbImage, ImageInfo), ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    if bytes.len() > max_size {
        return Err(ImageError::TooLarge(bytes.len(), max_size));
    }

    let format =
        image::guess_format(bytes).map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

    let info = ImageInfo {
        width: img.width(),
        height: img.height(),
        format,
        size_bytes: bytes.len(),
    };

    Ok((img.to_rgb8(), info))
}

/// Read and decode an image file
///
/// Fails with [`ImageError::NotFound`] before any read when the path does not exist.
pub fn decode_image_file<P: AsRef<Path>>(path: P) -> Result<RgbImage, ImageError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImageError::NotFound(path.to_path_buf()));
    }

    let data = std::fs::read(path)?;
    decode_and_validate(&data)
}
