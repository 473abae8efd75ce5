// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! PaddleOCR text recognition model
//!
//! Recognizes the text content of a single cropped text region.

use anyhow::{Context, Result};
use image::RgbImage;
use ndarray::{Array2, ArrayView2};
use ort::session::Session;
use ort::value::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

use super::preprocessing::preprocess_for_recognition;
use super::session::{input_name, load_session};

/// Recognized text with confidence score
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedText {
    /// The recognized text content
    pub text: String,
    /// Mean probability of the emitted characters (0.0-1.0)
    pub confidence: f32,
}

impl RecognizedText {
    pub fn new(text: String, confidence: f32) -> Self {
        Self { text, confidence }
    }

    /// Check if the text is empty or whitespace only
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// PaddleOCR text recognition model
pub struct TextRecognizer {
    session: Session,
    /// CTC labels; index 0 is the blank token
    dictionary: Vec<String>,
    input_name: String,
}

impl std::fmt::Debug for TextRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRecognizer")
            .field("dictionary_size", &self.dictionary.len())
            .field("input_name", &self.input_name)
            .finish_non_exhaustive()
    }
}

impl TextRecognizer {
    /// Load the recognition model and its character dictionary
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found
    /// - Dictionary file not found or empty
    /// - ONNX Runtime initialization fails
    pub fn new(model_path: &Path, dict_path: &Path, use_gpu: bool) -> Result<Self> {
        if !model_path.exists() {
            anyhow::bail!("OCR recognition model not found: {}", model_path.display());
        }
        if !dict_path.exists() {
            anyhow::bail!(
                "OCR character dictionary not found: {}",
                dict_path.display()
            );
        }

        let dictionary = load_dictionary(dict_path)?;
        info!(
            "Loaded character dictionary with {} entries",
            dictionary.len()
        );

        info!(
            "Loading OCR recognition model from {}",
            model_path.display()
        );
        let session = load_session(model_path, use_gpu)?;
        let input_name = input_name(&session, "x");
        debug!("Recognition model loaded - input: {}", input_name);

        Ok(Self {
            session,
            dictionary,
            input_name,
        })
    }

    /// Recognize the text in one cropped region
    pub fn recognize(&mut self, crop: &RgbImage) -> Result<RecognizedText> {
        let input = preprocess_for_recognition(crop);

        let input_value = Value::from_array(input).context("Failed to create input tensor")?;
        let outputs = self
            .session
            .run(ort::inputs![&self.input_name => input_value])
            .context("Recognition inference failed")?;

        let output_tensor = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        // Expected shape: [1, seq_len, num_classes] or [seq_len, num_classes]
        let (seq_len, num_classes) = match output_tensor.shape() {
            [_, t, c] | [t, c] => (*t, *c),
            other => anyhow::bail!("Unexpected recognition output shape: {:?}", other),
        };

        let probs: Array2<f32> = output_tensor
            .to_owned()
            .into_shape_with_order((seq_len, num_classes))
            .context("Failed to reshape recognition output")?;

        Ok(ctc_decode(probs.view(), &self.dictionary))
    }
}

/// Load a PaddleOCR character dictionary.
///
/// One label per line. The blank token is prepended at index 0 and a space
/// label is appended, matching how the recognition models were trained.
pub fn load_dictionary<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(path.as_ref()).context(format!(
        "Failed to open dictionary: {}",
        path.as_ref().display()
    ))?;

    let mut dictionary = vec![String::new()];
    for line in BufReader::new(file).lines() {
        let line = line.context("Failed to read dictionary line")?;
        let label = line.trim_end_matches(['\r', '\n']);
        if !label.is_empty() {
            dictionary.push(label.to_string());
        }
    }

    if dictionary.len() == 1 {
        anyhow::bail!("Dictionary is empty: {}", path.as_ref().display());
    }

    dictionary.push(" ".to_string());
    Ok(dictionary)
}

/// CTC greedy (best path) decoding.
///
/// Takes the argmax class per timestep, drops blanks and collapses repeats.
/// Confidence is the mean probability of the emitted characters.
pub fn ctc_decode(probs: ArrayView2<f32>, dictionary: &[String]) -> RecognizedText {
    let mut text = String::new();
    let mut total = 0.0f32;
    let mut emitted = 0usize;
    let mut prev_index: Option<usize> = None;

    for row in probs.rows() {
        let (max_index, max_prob) = row
            .iter()
            .enumerate()
            .fold((0usize, f32::NEG_INFINITY), |best, (i, &p)| {
                if p > best.1 {
                    (i, p)
                } else {
                    best
                }
            });

        if max_index != 0 && Some(max_index) != prev_index {
            if let Some(label) = dictionary.get(max_index) {
                text.push_str(label);
                total += max_prob;
                emitted += 1;
            }
        }

        prev_index = Some(max_index);
    }

    let confidence = if emitted == 0 {
        0.0
    } else {
        total / emitted as f32
    };

    RecognizedText::new(text, confidence)
}
