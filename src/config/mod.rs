// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process configuration from environment variables

use anyhow::{anyhow, Result};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::vision::ocr::{OcrEngineConfig, OcrLanguage, DEFAULT_DROP_SCORE, DEFAULT_MODEL_DIR};
use crate::vision::DEFAULT_MAX_IMAGE_SIZE;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Server and engine settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub ocr: OcrEngineConfig,
    pub max_upload_bytes: usize,
    /// Accepted for compatibility; hot reload is not supported
    pub reload: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            ocr: OcrEngineConfig::default(),
            max_upload_bytes: DEFAULT_MAX_IMAGE_SIZE,
            reload: false,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    ///
    /// Unset or blank variables take their defaults; malformed values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = parse_or(get("HOST"), "HOST", || {
            IpAddr::from_str(DEFAULT_HOST).map_err(|e| anyhow!(e))
        })?;
        let port = parse_or(get("PORT"), "PORT", || Ok(DEFAULT_PORT))?;

        let use_gpu = match get("OCR_USE_GPU") {
            Some(v) => parse_bool(&v).ok_or_else(|| anyhow!("Invalid OCR_USE_GPU: {}", v))?,
            None => false,
        };
        let language = match get("OCR_LANG") {
            Some(v) => OcrLanguage::from_str(&v).map_err(|e| anyhow!("Invalid OCR_LANG: {}", e))?,
            None => OcrLanguage::default(),
        };
        let model_dir = get("OCR_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR));
        let drop_score = parse_or(get("OCR_DROP_SCORE"), "OCR_DROP_SCORE", || {
            Ok(DEFAULT_DROP_SCORE)
        })?;
        let lock_timeout = get("OCR_LOCK_TIMEOUT_MS")
            .map(|v| {
                v.parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|e| anyhow!("Invalid OCR_LOCK_TIMEOUT_MS '{}': {}", v, e))
            })
            .transpose()?;
        let max_upload_bytes = parse_or(get("MAX_UPLOAD_BYTES"), "MAX_UPLOAD_BYTES", || {
            Ok(DEFAULT_MAX_IMAGE_SIZE)
        })?;
        let reload = match get("RELOAD") {
            Some(v) => parse_bool(&v).ok_or_else(|| anyhow!("Invalid RELOAD: {}", v))?,
            None => false,
        };

        Ok(Self {
            host,
            port,
            ocr: OcrEngineConfig {
                model_dir,
                use_gpu,
                language,
                drop_score,
                lock_timeout,
            },
            max_upload_bytes,
            reload,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T, D>(value: Option<String>, key: &str, default: D) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    D: FnOnce() -> Result<T>,
{
    match value {
        Some(v) => v
            .parse::<T>()
            .map_err(|e| anyhow!("Invalid {} '{}': {}", key, v, e)),
        None => default(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
