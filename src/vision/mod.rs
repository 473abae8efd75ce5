// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing module
//!
//! This module provides:
//! - Image decoding and validation for uploads and files
//! - OCR (Optical Character Recognition) via PaddleOCR ONNX models

pub mod image_utils;
pub mod ocr;

pub use image_utils::{
    decode_and_validate, decode_image_bytes, decode_image_file, ImageError,
    ImageInfo, DEFAULT_MAX_IMAGE_SIZE,
};
