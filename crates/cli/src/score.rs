// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Score quantization.
//!
//! Maps a continuous metric over a known scale `[0, scale)` onto an integer
//! score in `[0, max_score]`. The scale is split into `max_score + 1` equal,
//! left-closed regions; the index of the region holding the metric is the
//! score. Anything at or above the start of the last region maps to
//! `max_score`.
//!
//! Comparisons happen after rounding to two decimal places, so a metric that
//! sits on a computed boundary resolves to the higher region.

use crate::error::CheckFailure;

/// Rounding precision for boundary comparisons.
const PRECISION: f64 = 100.0;

/// Reasons a metric cannot be translated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreError {
    /// `max_score` is negative (or does not fit a score).
    #[error("invalid max score {0}")]
    InvalidMaxScore(i64),

    /// The metric scale must be positive and finite.
    #[error("invalid metric scale {0}")]
    InvalidScale(f64),

    /// The metric is negative or NaN.
    #[error("invalid metric value {0}")]
    InvalidMetric(f64),
}

impl From<ScoreError> for CheckFailure {
    fn from(err: ScoreError) -> Self {
        CheckFailure::new(format!("score translation failed: {err}"))
    }
}

/// Translate `metric` (over `[0, scale)`) into a score in `[0, max_score]`.
pub fn translate_score(metric: f64, scale: f64, max_score: i64) -> Result<u32, ScoreError> {
    let max = u32::try_from(max_score).map_err(|_| ScoreError::InvalidMaxScore(max_score))?;

    if !scale.is_finite() || scale <= 0.0 {
        return Err(ScoreError::InvalidScale(scale));
    }

    let value = round2(metric);
    if value.is_nan() || value < 0.0 {
        return Err(ScoreError::InvalidMetric(metric));
    }

    let step = scale / (f64::from(max) + 1.0);
    let start = |index: u32| round2(f64::from(index) * step);

    // Rounded edges are non-decreasing, so the region holding `value` is the
    // last one whose start does not exceed it.
    let (mut low, mut high) = (0, max);
    while low < high {
        let mid = low + (high - low).div_ceil(2);
        if start(mid) <= value {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    Ok(low)
}

fn round2(value: f64) -> f64 {
    (value * PRECISION).round() / PRECISION
}

#[cfg(test)]
#[path = "score_tests.rs"]
mod tests;
