// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! PaddleOCR integration for text extraction from images
//!
//! Components:
//! - `engine` - Engine trait and its native nested output
//! - `guard` - Serialized access to the single engine instance
//! - `normalize` - Flattening engine output into detection records
//! - `pipeline` - Decode-then-recognize entry points
//! - `detection` - Text region detection (DB post-processing)
//! - `recognition` - Text recognition from detected regions (CTC)
//! - `preprocessing` - Image preprocessing for models
//! - `model` - Combined ONNX OCR pipeline

pub mod config;
pub mod detection;
pub mod engine;
pub mod error;
pub mod guard;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod preprocessing;
pub mod recognition;
pub mod session;

pub use config::{OcrEngineConfig, OcrLanguage, DEFAULT_DROP_SCORE, DEFAULT_MODEL_DIR};
pub use detection::{DetectionParams, TextBox, TextDetector};
pub use engine::{OcrEngine, RawBox, RawEntry, RawOcrOutput};
pub use error::OcrError;
pub use guard::EngineGuard;
pub use model::PaddleOcrModel;
pub use normalize::{format_results, Detection};
pub use pipeline::{run_ocr_from_bytes, run_ocr_from_path};
pub use recognition::{RecognizedText, TextRecognizer};
