// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod recognize;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Fabstir OCR Node CLI
#[derive(Parser, Debug)]
#[command(name = "fabstir-ocr-cli")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Run the OCR engine on local images", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recognize text in a local image file
    Recognize(recognize::RecognizeArgs),

    /// List supported recognition languages
    Languages,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Recognize(args) => recognize::recognize(args).await,
        Commands::Languages => recognize::list_languages(),
    }
}
