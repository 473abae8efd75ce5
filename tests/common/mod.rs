// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared fixtures: deterministic engines, image encoding, multipart requests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
};
use fabstir_ocr_node::vision::ocr::{OcrEngine, RawOcrOutput};
use image::{Rgb, RgbImage};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const BOUNDARY: &str = "fabstir-ocr-test-boundary";

/// Reports one detection covering the whole image, text `"<w>x<h>"`.
/// Images one pixel wide produce no detections.
pub struct DimensionsEngine {
    pub calls: Arc<AtomicUsize>,
    pub delay: Duration,
}

impl DimensionsEngine {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new()
        }
    }
}

impl OcrEngine for DimensionsEngine {
    fn ocr(&mut self, image: &RgbImage) -> anyhow::Result<RawOcrOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        let (w, h) = image.dimensions();
        if w == 1 {
            return Ok(vec![vec![]]);
        }

        let (wf, hf) = (w as f32, h as f32);
        Ok(vec![vec![(
            [[0.0, 0.0], [wf, 0.0], [wf, hf], [0.0, hf]],
            (format!("{}x{}", w, h), 0.875),
        )]])
    }
}

/// Sleeps inside the engine call and records the peak number of
/// simultaneous calls.
pub struct InFlightEngine {
    pub delay: Duration,
    pub current: Arc<AtomicUsize>,
    pub peak: Arc<AtomicUsize>,
}

impl InFlightEngine {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            current: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl OcrEngine for InFlightEngine {
    fn ocr(&mut self, image: &RgbImage) -> anyhow::Result<RawOcrOutput> {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.current.fetch_sub(1, Ordering::SeqCst);

        let w = image.width() as f32;
        Ok(vec![
            vec![([[0.0, 0.0], [w, 0.0], [w, 1.0], [0.0, 1.0]], ("line one".to_string(), 0.5))],
            vec![([[0.0, 2.0], [w, 2.0], [w, 3.0], [0.0, 3.0]], ("line two".to_string(), 0.75))],
        ])
    }
}

/// Always fails
pub struct FailingEngine;

impl OcrEngine for FailingEngine {
    fn ocr(&mut self, _image: &RgbImage) -> anyhow::Result<RawOcrOutput> {
        Err(anyhow::anyhow!("inference backend unavailable"))
    }
}

/// Encode a solid-color RGB image in the given format
pub fn encode_image(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 40]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    encode_image(width, height, image::ImageFormat::Png)
}

/// Build a multipart/form-data body with a single part
pub fn multipart_body(field: &str, content_type: Option<&str>, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"upload.bin\"\r\n",
            field
        )
        .as_bytes(),
    );
    if let Some(ct) = content_type {
        body.extend_from_slice(format!("Content-Type: {}\r\n", ct).as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// POST /ocr with a single multipart part
pub fn ocr_request(field: &str, content_type: Option<&str>, data: &[u8]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/ocr")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(field, content_type, data)))
        .unwrap()
}

/// Read a response body as JSON
pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
