// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use crate::vision::ocr::{
    run_ocr_from_path, Detection, EngineGuard, OcrEngineConfig, OcrLanguage, DEFAULT_DROP_SCORE,
    DEFAULT_MODEL_DIR,
};

/// Arguments for recognize command
#[derive(Args, Debug)]
pub struct RecognizeArgs {
    /// Image file to run OCR on
    pub image: PathBuf,

    /// Recognition language (english, chinese, japanese, korean)
    #[arg(long, env = "OCR_LANG", default_value = "english")]
    pub lang: OcrLanguage,

    /// Use the CUDA execution provider
    #[arg(long, env = "OCR_USE_GPU")]
    pub gpu: bool,

    /// Directory holding the ONNX models and dictionaries
    #[arg(long, env = "OCR_MODEL_DIR", default_value = DEFAULT_MODEL_DIR)]
    pub model_dir: PathBuf,

    /// Minimum recognition score kept in results
    #[arg(long, env = "OCR_DROP_SCORE", default_value_t = DEFAULT_DROP_SCORE)]
    pub drop_score: f32,

    /// Print detections as JSON instead of text lines
    #[arg(long)]
    pub json: bool,
}

/// Run OCR on a local image and print the results
pub async fn recognize(args: RecognizeArgs) -> Result<()> {
    dotenv::dotenv().ok();
    validate_image_path(&args.image)?;

    let config = OcrEngineConfig {
        model_dir: args.model_dir.clone(),
        use_gpu: args.gpu,
        language: args.lang,
        drop_score: args.drop_score,
        lock_timeout: None,
    };

    println!("🔧 Loading OCR engine ({})...", config.language);
    let engine = EngineGuard::initialize(&config)?;

    info!("Running OCR on {}", args.image.display());
    let detections = run_ocr_from_path(&engine, &args.image).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&detections)?);
    } else {
        for line in detection_lines(&detections) {
            println!("{}", line);
        }
        println!("✅ {} text regions found", detections.len());
    }

    Ok(())
}

/// One `text: <t>, score: <s>` line per detection
pub fn detection_lines(detections: &[Detection]) -> Vec<String> {
    detections
        .iter()
        .map(|d| format!("text: {}, score: {}", d.text, d.score))
        .collect()
}

/// Print the supported recognition languages
pub fn list_languages() -> Result<()> {
    println!("Supported languages:");
    for language in OcrLanguage::ALL {
        println!("  {:<10} (model prefix: {})", language.to_string(), language.code());
    }
    Ok(())
}

/// Check a recognize target before the engine is loaded
pub fn validate_image_path(path: &std::path::Path) -> Result<()> {
    if !path.is_file() {
        return Err(anyhow!("Image not found: {}", path.display()));
    }
    Ok(())
}
