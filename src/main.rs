// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use fabstir_ocr_node::{
    api::http_server::{start_server, AppState},
    config::ServerConfig,
    version,
    vision::ocr::EngineGuard,
};
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // RUST_LOG wins over LOG_LEVEL; default info
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into())))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("🚀 Starting Fabstir OCR Node...\n");
    println!("📦 BUILD VERSION: {}", version::VERSION);
    println!("📅 Build Date: {}", version::BUILD_DATE);
    println!();
    info!("{}", version::get_version_string());
    info!("Features: {}", version::FEATURES.join(", "));

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    if config.reload {
        warn!("RELOAD is set but hot reload is not supported; ignoring");
    }

    println!("🔤 Initializing OCR engine...");
    println!("   Language:   {}", config.ocr.language);
    println!("   Model dir:  {}", config.ocr.model_dir.display());
    println!("   GPU:        {}", config.ocr.use_gpu);

    let engine = match EngineGuard::initialize(&config.ocr) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!(
                "   Expected det_model.onnx, {}_rec_model.onnx and {}_dict.txt",
                config.ocr.language.code(),
                config.ocr.language.code()
            );
            std::process::exit(1);
        }
    };
    println!("✅ OCR engine initialized");

    if let Some(bound) = config.ocr.lock_timeout {
        info!("Engine lock wait bounded at {:?}", bound);
    }

    let state = AppState::new(engine, config.max_upload_bytes);
    start_server(config.bind_addr(), state).await?;

    println!("👋 Goodbye!");
    Ok(())
}
