// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Flattening of engine output into uniform detection records

use serde::{Deserialize, Serialize};

use super::engine::RawEntry;

/// One recognized text region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Recognized text
    pub text: String,
    /// Engine confidence, passed through without range checks
    pub score: f64,
    /// Quadrilateral around the text, 4 `[x, y]` points in engine order
    #[serde(rename = "box")]
    pub bounding_box: [[f64; 2]; 4],
}

/// Flatten grouped engine output into a single ordered list.
///
/// Group order and entry order are preserved. Coordinates and scores are
/// widened to `f64`. An engine that found nothing yields an empty list.
pub fn format_results<G, L>(raw: G) -> Vec<Detection>
where
    G: IntoIterator<Item = L>,
    L: IntoIterator<Item = RawEntry>,
{
    raw.into_iter()
        .flatten()
        .map(|(points, (text, score))| Detection {
            text,
            score: f64::from(score),
            bounding_box: points.map(|[x, y]| [f64::from(x), f64::from(y)]),
        })
        .collect()
}
