// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Serialized access to the single OCR engine instance
//!
//! The engine is not reentrant. Every recognition takes the engine lock for
//! the duration of the engine call only; decoding and result normalization
//! happen outside of it.
//!
//! The lock is a fair (FIFO) async mutex, so waiting requests are served in
//! arrival order and do not tie up runtime worker threads while queued. The
//! engine call runs on the blocking pool with the owned guard moved into it,
//! so the lock is released on every exit path, including an engine panic.
//!
//! A slow inference stalls every queued request. By default callers wait
//! without bound; set `lock_timeout` to fail fast with [`OcrError::Busy`].

use image::RgbImage;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::config::OcrEngineConfig;
use super::engine::OcrEngine;
use super::error::OcrError;
use super::model::PaddleOcrModel;
use super::normalize::{format_results, Detection};

/// Owner of the process-wide OCR engine
pub struct EngineGuard {
    engine: Arc<Mutex<Box<dyn OcrEngine>>>,
    lock_timeout: Option<Duration>,
}

impl std::fmt::Debug for EngineGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineGuard")
            .field("lock_timeout", &self.lock_timeout)
            .finish_non_exhaustive()
    }
}

impl EngineGuard {
    /// Wrap an already constructed engine
    pub fn new(engine: Box<dyn OcrEngine>, lock_timeout: Option<Duration>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            lock_timeout,
        }
    }

    /// Load the PaddleOCR models and wrap them.
    ///
    /// Called once at startup. A failure here means a model file or the ONNX
    /// runtime is missing; it is not retried.
    pub fn initialize(config: &OcrEngineConfig) -> Result<Self, OcrError> {
        let model = PaddleOcrModel::new(config)
            .map_err(|e| OcrError::Initialization(format!("{:#}", e)))?;
        Ok(Self::new(Box::new(model), config.lock_timeout))
    }

    pub fn lock_timeout(&self) -> Option<Duration> {
        self.lock_timeout
    }

    /// Run the engine on one image with exclusive access
    pub async fn recognize(&self, pixels: RgbImage) -> Result<Vec<Detection>, OcrError> {
        let mut engine = self.acquire().await?;

        let raw = tokio::task::spawn_blocking(move || engine.ocr(&pixels))
            .await
            .map_err(|e| {
                if e.is_panic() {
                    OcrError::Engine("engine panicked during recognition".to_string())
                } else {
                    OcrError::Engine("engine task was cancelled".to_string())
                }
            })?
            .map_err(|e| OcrError::Engine(e.to_string()))?;

        Ok(format_results(raw))
    }

    async fn acquire(&self) -> Result<OwnedMutexGuard<Box<dyn OcrEngine>>, OcrError> {
        let lock = self.engine.clone().lock_owned();
        match self.lock_timeout {
            Some(bound) => tokio::time::timeout(bound, lock)
                .await
                .map_err(|_| OcrError::Busy(bound)),
            None => Ok(lock.await),
        }
    }
}
