// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR engine configuration

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default model directory
pub const DEFAULT_MODEL_DIR: &str = "./models/paddleocr-onnx";

/// Recognition results scoring below this are dropped by the engine
pub const DEFAULT_DROP_SCORE: f32 = 0.5;

/// Recognition language
///
/// Selects which recognition model and character dictionary are loaded.
/// The detection model is shared by all languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OcrLanguage {
    #[default]
    English,
    Chinese,
    Japanese,
    Korean,
}

impl OcrLanguage {
    pub const ALL: [OcrLanguage; 4] = [
        OcrLanguage::English,
        OcrLanguage::Chinese,
        OcrLanguage::Japanese,
        OcrLanguage::Korean,
    ];

    /// PaddleOCR language code, used as the model file prefix
    pub fn code(&self) -> &'static str {
        match self {
            OcrLanguage::English => "en",
            OcrLanguage::Chinese => "ch",
            OcrLanguage::Japanese => "japan",
            OcrLanguage::Korean => "korean",
        }
    }
}

impl fmt::Display for OcrLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OcrLanguage::English => "english",
            OcrLanguage::Chinese => "chinese",
            OcrLanguage::Japanese => "japanese",
            OcrLanguage::Korean => "korean",
        };
        f.write_str(name)
    }
}

impl FromStr for OcrLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(OcrLanguage::English),
            "ch" | "zh" | "chinese" => Ok(OcrLanguage::Chinese),
            "ja" | "japan" | "japanese" => Ok(OcrLanguage::Japanese),
            "ko" | "korean" => Ok(OcrLanguage::Korean),
            other => Err(format!(
                "unsupported language '{}', supported: english, chinese, japanese, korean",
                other
            )),
        }
    }
}

/// Configuration for constructing the OCR engine
#[derive(Debug, Clone)]
pub struct OcrEngineConfig {
    /// Directory holding the ONNX models and dictionaries
    pub model_dir: PathBuf,
    /// Use the CUDA execution provider
    pub use_gpu: bool,
    /// Recognition language
    pub language: OcrLanguage,
    /// Minimum recognition score kept in results
    pub drop_score: f32,
    /// Maximum time a request waits for the engine lock; `None` waits forever
    pub lock_timeout: Option<Duration>,
}

impl Default for OcrEngineConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            use_gpu: false,
            language: OcrLanguage::English,
            drop_score: DEFAULT_DROP_SCORE,
            lock_timeout: None,
        }
    }
}

impl OcrEngineConfig {
    pub fn new(use_gpu: bool, language: OcrLanguage) -> Self {
        Self {
            use_gpu,
            language,
            ..Default::default()
        }
    }

    pub fn det_model_path(&self) -> PathBuf {
        self.model_dir.join("det_model.onnx")
    }

    pub fn rec_model_path(&self) -> PathBuf {
        self.model_dir
            .join(format!("{}_rec_model.onnx", self.language.code()))
    }

    pub fn dict_path(&self) -> PathBuf {
        self.model_dir.join(format!("{}_dict.txt", self.language.code()))
    }
}
