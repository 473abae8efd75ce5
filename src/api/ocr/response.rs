// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR response types

use serde::{Deserialize, Serialize};

use crate::vision::ocr::Detection;

/// Response from OCR processing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OcrResponse {
    /// Detected text regions in engine order
    pub detections: Vec<Detection>,
}

impl OcrResponse {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }
}
