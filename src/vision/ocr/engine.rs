// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR engine abstraction
//!
//! An engine takes a decoded RGB image and returns its native nested output:
//! one group per detected line (or per image), each entry a quadrilateral box
//! paired with the recognized text and its score.

use image::RgbImage;

/// Four corner points, engine-defined order (clockwise from top-left for PaddleOCR)
pub type RawBox = [[f32; 2]; 4];

/// One engine entry: `(box, (text, score))`
pub type RawEntry = (RawBox, (String, f32));

/// Engine-native output, grouped. Groups may be empty.
pub type RawOcrOutput = Vec<Vec<RawEntry>>;

/// A stateful, non-reentrant OCR engine.
///
/// Implementations take `&mut self` and are never shared directly between
/// requests; access goes through [`EngineGuard`](super::guard::EngineGuard).
#[cfg_attr(test, mockall::automock)]
pub trait OcrEngine: Send {
    /// Run detection + recognition on a single image
    fn ocr(&mut self, image: &RgbImage) -> anyhow::Result<RawOcrOutput>;
}
