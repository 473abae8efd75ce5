// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod version;
pub mod vision;

pub use api::http_server::{create_app, AppState};
pub use vision::ocr::{Detection, EngineGuard, OcrEngine, OcrError};
