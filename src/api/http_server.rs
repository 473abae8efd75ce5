// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use super::handlers::{docs_handler, healthz_handler, root_handler};
use super::ocr::ocr_handler;
use crate::vision::ocr::EngineGuard;

/// Allowance on top of the image bound for multipart boundaries and headers
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Shared handler state
#[derive(Clone, Debug)]
pub struct AppState {
    /// The single guarded OCR engine
    pub engine: Arc<EngineGuard>,
    /// Maximum accepted image size in bytes
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(engine: EngineGuard, max_upload_bytes: usize) -> Self {
        Self {
            engine: Arc::new(engine),
            max_upload_bytes,
        }
    }
}

/// Build the application router
pub fn create_app(state: AppState) -> Router {
    let body_limit = state
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(root_handler))
        .route("/healthz", get(healthz_handler))
        .route("/docs", get(docs_handler))
        .route("/ocr", post(ocr_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until Ctrl+C
pub async fn start_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    info!("OCR API listening on {}", local_addr);
    println!("🌐 OCR API listening on http://{}", local_addr);
    println!("📖 API docs: http://{}/docs", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("OCR API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    println!("\n🛑 Shutting down...");
}
