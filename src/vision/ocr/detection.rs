// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! PaddleOCR text detection model
//!
//! Runs the DB (Differentiable Binarization) detector and turns its
//! probability map into quadrilateral text boxes in original image
//! coordinates.

use anyhow::{Context, Result};
use image::RgbImage;
use ndarray::{Array2, ArrayView2};
use ort::session::Session;
use ort::value::Value;
use std::cmp::Ordering;
use std::path::Path;
use tracing::{debug, info};

use super::preprocessing::{preprocess_for_detection, PreprocessInfo, OCR_INPUT_SIZE};
use super::session::{input_name, load_session};

/// Post-processing parameters for the DB probability map
#[derive(Debug, Clone, Copy)]
pub struct DetectionParams {
    /// Pixel probability threshold for the binary text mask
    pub threshold: f32,
    /// Minimum mean probability for a region to be kept
    pub box_threshold: f32,
    /// Minimum side length in probability-map pixels
    pub min_size: f32,
    /// Box expansion ratio (DB shrinks text kernels during training)
    pub unclip_ratio: f32,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            box_threshold: 0.5,
            min_size: 3.0,
            unclip_ratio: 1.6,
        }
    }
}

/// A detected text box
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    /// Corners clockwise from top-left, original image coordinates
    pub points: [[f32; 2]; 4],
    /// Mean probability inside the region
    pub score: f32,
}

impl TextBox {
    pub fn left(&self) -> f32 {
        self.points[0][0]
    }

    pub fn top(&self) -> f32 {
        self.points[0][1]
    }

    pub fn width(&self) -> f32 {
        self.points[1][0] - self.points[0][0]
    }

    pub fn height(&self) -> f32 {
        self.points[3][1] - self.points[0][1]
    }
}

/// PaddleOCR text detection model
pub struct TextDetector {
    session: Session,
    input_name: String,
    params: DetectionParams,
}

impl std::fmt::Debug for TextDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextDetector")
            .field("input_name", &self.input_name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl TextDetector {
    /// Load the detection model (det_model.onnx)
    pub fn new(model_path: &Path, use_gpu: bool) -> Result<Self> {
        if !model_path.exists() {
            anyhow::bail!("OCR detection model not found: {}", model_path.display());
        }

        info!("Loading OCR detection model from {}", model_path.display());
        let session = load_session(model_path, use_gpu)?;
        let input_name = input_name(&session, "x");
        debug!("Detection model loaded - input: {}", input_name);

        Ok(Self {
            session,
            input_name,
            params: DetectionParams::default(),
        })
    }

    /// Detect text boxes, sorted in reading order
    pub fn detect(&mut self, image: &RgbImage) -> Result<Vec<TextBox>> {
        let info = PreprocessInfo::new(image, OCR_INPUT_SIZE);
        let input = preprocess_for_detection(image);

        let input_value = Value::from_array(input).context("Failed to create input tensor")?;
        let outputs = self
            .session
            .run(ort::inputs![&self.input_name => input_value])
            .context("Detection inference failed")?;

        let output_tensor = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        // Expected shape: [1, 1, H, W] or [1, H, W]
        let (height, width) = match output_tensor.shape() {
            [_, _, h, w] | [_, h, w] => (*h, *w),
            other => anyhow::bail!("Unexpected detection output shape: {:?}", other),
        };

        let prob_map: Array2<f32> = output_tensor
            .to_owned()
            .into_shape_with_order((height, width))
            .context("Failed to reshape detection output")?;

        let mut boxes = boxes_from_probability_map(prob_map.view(), &info, &self.params);
        sort_boxes(&mut boxes);

        debug!("Detected {} text regions", boxes.len());
        Ok(boxes)
    }
}

/// Extract text boxes from a DB probability map.
///
/// Connected regions above `threshold` become axis-aligned boxes, expanded by
/// the unclip distance and mapped back through the letterbox transform.
pub fn boxes_from_probability_map(
    prob_map: ArrayView2<f32>,
    info: &PreprocessInfo,
    params: &DetectionParams,
) -> Vec<TextBox> {
    let (height, width) = prob_map.dim();
    if height == 0 || width == 0 {
        return Vec::new();
    }

    // Probability map may be smaller than the network input
    let scale_x = OCR_INPUT_SIZE as f32 / width as f32;
    let scale_y = OCR_INPUT_SIZE as f32 / height as f32;

    let mut visited = Array2::<bool>::from_elem((height, width), false);
    let mut boxes = Vec::new();

    for start_y in 0..height {
        for start_x in 0..width {
            if visited[[start_y, start_x]] || prob_map[[start_y, start_x]] < params.threshold {
                continue;
            }

            let region = flood_fill(&prob_map, &mut visited, start_x, start_y, params.threshold);

            let box_w = (region.max_x - region.min_x + 1) as f32;
            let box_h = (region.max_y - region.min_y + 1) as f32;
            if box_w < params.min_size || box_h < params.min_size {
                continue;
            }

            let score = region.score_sum / region.count as f32;
            if score < params.box_threshold {
                continue;
            }

            // Offset distance = area * ratio / perimeter
            let distance = box_w * box_h * params.unclip_ratio / (2.0 * (box_w + box_h));
            let x1 = (region.min_x as f32 - distance) * scale_x;
            let y1 = (region.min_y as f32 - distance) * scale_y;
            let x2 = (region.max_x as f32 + 1.0 + distance) * scale_x;
            let y2 = (region.max_y as f32 + 1.0 + distance) * scale_y;

            let (left, top) = info.map_to_original(x1, y1);
            let (right, bottom) = info.map_to_original(x2, y2);
            if right - left < 1.0 || bottom - top < 1.0 {
                continue;
            }

            boxes.push(TextBox {
                points: [[left, top], [right, top], [right, bottom], [left, bottom]],
                score,
            });
        }
    }

    boxes
}

/// Sort boxes top-to-bottom, then left-to-right within a line.
///
/// Boxes whose top edges are within 10px are treated as the same line.
pub fn sort_boxes(boxes: &mut [TextBox]) {
    const LINE_TOLERANCE: f32 = 10.0;

    boxes.sort_by(|a, b| {
        a.top()
            .partial_cmp(&b.top())
            .unwrap_or(Ordering::Equal)
            .then(a.left().partial_cmp(&b.left()).unwrap_or(Ordering::Equal))
    });

    for i in 0..boxes.len().saturating_sub(1) {
        for j in (0..=i).rev() {
            let same_line = (boxes[j + 1].top() - boxes[j].top()).abs() < LINE_TOLERANCE;
            if same_line && boxes[j + 1].left() < boxes[j].left() {
                boxes.swap(j, j + 1);
            } else {
                break;
            }
        }
    }
}

struct Region {
    min_x: usize,
    max_x: usize,
    min_y: usize,
    max_y: usize,
    count: usize,
    score_sum: f32,
}

/// 4-connected flood fill over pixels at or above `threshold`
fn flood_fill(
    prob_map: &ArrayView2<f32>,
    visited: &mut Array2<bool>,
    start_x: usize,
    start_y: usize,
    threshold: f32,
) -> Region {
    let (height, width) = prob_map.dim();
    let mut region = Region {
        min_x: start_x,
        max_x: start_x,
        min_y: start_y,
        max_y: start_y,
        count: 0,
        score_sum: 0.0,
    };

    let mut stack = vec![(start_x, start_y)];
    visited[[start_y, start_x]] = true;

    while let Some((x, y)) = stack.pop() {
        region.count += 1;
        region.score_sum += prob_map[[y, x]];
        region.min_x = region.min_x.min(x);
        region.max_x = region.max_x.max(x);
        region.min_y = region.min_y.min(y);
        region.max_y = region.max_y.max(y);

        let neighbors = [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ];
        for (nx, ny) in neighbors {
            if nx < width && ny < height && !visited[[ny, nx]] && prob_map[[ny, nx]] >= threshold
            {
                visited[[ny, nx]] = true;
                stack.push((nx, ny));
            }
        }
    }

    region
}
