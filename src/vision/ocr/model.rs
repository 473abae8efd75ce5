// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! PaddleOCR model wrapper for text detection and recognition

use anyhow::{Context, Result};
use image::{imageops, RgbImage};
use std::time::Instant;
use tracing::{debug, info};

use super::config::OcrEngineConfig;
use super::detection::{TextBox, TextDetector};
use super::engine::{OcrEngine, RawEntry, RawOcrOutput};
use super::recognition::TextRecognizer;

/// Pixel rectangle `(x, y, width, height)` inside an image
pub type CropRect = (u32, u32, u32, u32);

/// Crops at least this many times taller than wide are read as vertical text
pub const VERTICAL_TEXT_RATIO: f32 = 1.5;

/// PaddleOCR model for text extraction
///
/// Combines text detection and recognition models for end-to-end OCR.
pub struct PaddleOcrModel {
    detector: TextDetector,
    recognizer: TextRecognizer,
    drop_score: f32,
}

impl std::fmt::Debug for PaddleOcrModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaddleOcrModel")
            .field("detector", &self.detector)
            .field("recognizer", &self.recognizer)
            .field("drop_score", &self.drop_score)
            .finish()
    }
}

impl PaddleOcrModel {
    /// Load PaddleOCR models from the configured directory
    ///
    /// Expected files:
    /// - det_model.onnx (text detection)
    /// - {lang}_rec_model.onnx (text recognition)
    /// - {lang}_dict.txt (character dictionary)
    pub fn new(config: &OcrEngineConfig) -> Result<Self> {
        info!(
            "Loading PaddleOCR models from {} (language: {}, gpu: {})",
            config.model_dir.display(),
            config.language,
            config.use_gpu
        );

        let detector = TextDetector::new(&config.det_model_path(), config.use_gpu)
            .context("Failed to load text detector")?;
        let recognizer = TextRecognizer::new(
            &config.rec_model_path(),
            &config.dict_path(),
            config.use_gpu,
        )
        .context("Failed to load text recognizer")?;

        info!("✅ PaddleOCR models loaded");

        Ok(Self {
            detector,
            recognizer,
            drop_score: config.drop_score,
        })
    }
}

impl OcrEngine for PaddleOcrModel {
    fn ocr(&mut self, image: &RgbImage) -> Result<RawOcrOutput> {
        let start = Instant::now();
        let boxes = self.detector.detect(image)?;

        let mut entries: Vec<RawEntry> = Vec::with_capacity(boxes.len());
        for text_box in &boxes {
            let Some((x, y, w, h)) = crop_rect(text_box, image.width(), image.height()) else {
                continue;
            };

            let crop = orient_crop(imageops::crop_imm(image, x, y, w, h).to_image());
            let recognized = self.recognizer.recognize(&crop)?;

            if recognized.is_empty() || recognized.confidence < self.drop_score {
                continue;
            }

            entries.push((text_box.points, (recognized.text, recognized.confidence)));
        }

        debug!(
            "OCR found {} boxes, kept {} in {}ms",
            boxes.len(),
            entries.len(),
            start.elapsed().as_millis()
        );

        Ok(vec![entries])
    }
}

/// Turn a vertical text crop a quarter turn counter-clockwise so the
/// recognizer reads it left to right.
pub fn orient_crop(crop: RgbImage) -> RgbImage {
    let (w, h) = crop.dimensions();
    if w > 0 && h as f32 / w as f32 >= VERTICAL_TEXT_RATIO {
        imageops::rotate270(&crop)
    } else {
        crop
    }
}

/// Axis-aligned pixel rectangle covering a text box, clipped to the image.
///
/// Returns `None` when nothing of the box lies inside the image.
pub fn crop_rect(text_box: &TextBox, image_width: u32, image_height: u32) -> Option<CropRect> {
    let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
    let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
    for [px, py] in text_box.points {
        min_x = min_x.min(px);
        min_y = min_y.min(py);
        max_x = max_x.max(px);
        max_y = max_y.max(py);
    }

    let x0 = (min_x.floor().max(0.0) as u32).min(image_width);
    let y0 = (min_y.floor().max(0.0) as u32).min(image_height);
    let x1 = (max_x.ceil().max(0.0) as u32).min(image_width);
    let y1 = (max_y.ceil().max(0.0) as u32).min(image_height);

    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    Some((x0, y0, x1 - x0, y1 - y0))
}
