// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing for PaddleOCR

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use ndarray::Array4;

/// Target size for PaddleOCR detection model
pub const OCR_INPUT_SIZE: u32 = 640;

/// Recognition model input height (PP-OCRv4/v5 rec models use 48)
pub const REC_INPUT_HEIGHT: u32 = 48;

/// Maximum width for recognition model input
pub const REC_MAX_WIDTH: u32 = 320;

/// Mean values for detection normalization (ImageNet)
pub const MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// Std values for detection normalization (ImageNet)
pub const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Gray used for letterbox padding
const PAD_GRAY: Rgb<u8> = Rgb([128, 128, 128]);

/// Preprocess an image for OCR detection
///
/// Steps:
/// 1. Resize with aspect ratio preservation to OCR_INPUT_SIZE
/// 2. Pad to square with gray (128) background
/// 3. Normalize with ImageNet mean/std: (pixel/255 - mean) / std
/// 4. Convert to NCHW tensor format [1, 3, H, W]
pub fn preprocess_for_detection(image: &RgbImage) -> Array4<f32> {
    let padded = resize_with_padding(image, OCR_INPUT_SIZE);
    let size = OCR_INPUT_SIZE as usize;

    Array4::from_shape_fn((1, 3, size, size), |(_, c, y, x)| {
        let pixel = padded.get_pixel(x as u32, y as u32);
        (pixel[c] as f32 / 255.0 - MEAN[c]) / STD[c]
    })
}

/// Preprocess a cropped text region for recognition
///
/// Height is fixed at REC_INPUT_HEIGHT, width follows the aspect ratio and is
/// clamped to [4, REC_MAX_WIDTH]. Pixels are scaled to [-1, 1].
pub fn preprocess_for_recognition(image: &RgbImage) -> Array4<f32> {
    let (orig_w, orig_h) = image.dimensions();

    let scale = REC_INPUT_HEIGHT as f32 / orig_h.max(1) as f32;
    let new_width = ((orig_w as f32 * scale).ceil() as u32)
        .min(REC_MAX_WIDTH)
        .max(4);

    let resized = imageops::resize(image, new_width, REC_INPUT_HEIGHT, FilterType::Triangle);

    Array4::from_shape_fn(
        (1, 3, REC_INPUT_HEIGHT as usize, new_width as usize),
        |(_, c, y, x)| {
            let pixel = resized.get_pixel(x as u32, y as u32);
            (pixel[c] as f32 / 255.0 - 0.5) / 0.5
        },
    )
}

/// Resize image with aspect ratio preservation and padding
///
/// The image is scaled to fit within target_size x target_size
/// while preserving aspect ratio, then centered on a gray canvas.
pub fn resize_with_padding(image: &RgbImage, target_size: u32) -> RgbImage {
    let info = PreprocessInfo::new(image, target_size);
    let mut output = RgbImage::from_pixel(target_size, target_size, PAD_GRAY);

    if info.original_width == 0 || info.original_height == 0 {
        return output;
    }

    let resized = imageops::resize(image, info.scaled_width, info.scaled_height, FilterType::Triangle);
    imageops::replace(
        &mut output,
        &resized,
        info.offset_x as i64,
        info.offset_y as i64,
    );

    output
}

/// Scaling factor and offsets used during preprocessing
/// Useful for mapping detection results back to original coordinates
#[derive(Debug, Clone, Copy)]
pub struct PreprocessInfo {
    /// Scale factor applied
    pub scale: f32,
    /// X offset from padding
    pub offset_x: u32,
    /// Y offset from padding
    pub offset_y: u32,
    /// Width after scaling, before padding
    pub scaled_width: u32,
    /// Height after scaling, before padding
    pub scaled_height: u32,
    /// Original image width
    pub original_width: u32,
    /// Original image height
    pub original_height: u32,
}

impl PreprocessInfo {
    /// Calculate preprocessing info for an image
    pub fn new(image: &RgbImage, target_size: u32) -> Self {
        let (orig_w, orig_h) = image.dimensions();

        if orig_w == 0 || orig_h == 0 {
            return Self {
                scale: 1.0,
                offset_x: 0,
                offset_y: 0,
                scaled_width: 0,
                scaled_height: 0,
                original_width: orig_w,
                original_height: orig_h,
            };
        }

        let scale = (target_size as f32 / orig_w as f32).min(target_size as f32 / orig_h as f32);
        let new_w = ((orig_w as f32 * scale).round() as u32).clamp(1, target_size);
        let new_h = ((orig_h as f32 * scale).round() as u32).clamp(1, target_size);

        Self {
            scale,
            offset_x: (target_size - new_w) / 2,
            offset_y: (target_size - new_h) / 2,
            scaled_width: new_w,
            scaled_height: new_h,
            original_width: orig_w,
            original_height: orig_h,
        }
    }

    /// Map a coordinate from preprocessed space back to original image space,
    /// clamped to the image bounds
    pub fn map_to_original(&self, x: f32, y: f32) -> (f32, f32) {
        let orig_x = (x - self.offset_x as f32) / self.scale;
        let orig_y = (y - self.offset_y as f32) / self.scale;
        (
            orig_x.clamp(0.0, self.original_width as f32),
            orig_y.clamp(0.0, self.original_height as f32),
        )
    }
}
