//! Similarity scoring — cosine similarity and the client-facing match report.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed presentation offsets for the chart breakdown. The sub-scores are
/// derived from the overall score, not measured independently — a deliberate
/// simplification until real sub-scoring is a product requirement.
const SKILLS_OFFSET: f64 = 8.0;
const EXPERIENCE_OFFSET: f64 = 4.0;

const NORM_EPSILON: f64 = 1e-12;

#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("embedding dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("embedding has zero norm; cosine similarity is undefined")]
    ZeroNorm,
}

/// One bar of the client-side breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEntry {
    pub name: String,
    pub score: f64,
}

/// The full match report returned by `POST /match`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_score: f64,
    pub insights: String,
    #[serde(rename = "chartData")]
    pub chart_data: Vec<ChartEntry>,
}

/// Computes cosine similarity between two embedding vectors.
///
/// Accumulates in f64 so the result is stable regardless of dimensionality.
/// Returns an error instead of NaN/Inf for degenerate input.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, ScoreError> {
    if a.len() != b.len() {
        return Err(ScoreError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < NORM_EPSILON {
        return Err(ScoreError::ZeroNorm);
    }

    Ok(dot / denom)
}

/// Maps a cosine similarity to the client-facing match report:
/// percentage rounded to two decimals, plus the fixed-offset breakdown.
pub fn build_match_result(cosine: f64) -> MatchResult {
    let score = round2((cosine * 100.0).clamp(0.0, 100.0));

    MatchResult {
        match_score: score,
        insights: format!("Resume matches job description with {score}% similarity"),
        chart_data: vec![
            ChartEntry {
                name: "Overall".to_string(),
                score,
            },
            ChartEntry {
                name: "Skills".to_string(),
                score: round2((score - SKILLS_OFFSET).max(0.0)),
            },
            ChartEntry {
                name: "Experience".to_string(),
                score: round2((score - EXPERIENCE_OFFSET).max(0.0)),
            },
        ],
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
