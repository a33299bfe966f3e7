//! Boundary Transformation Analysis
//!
//! Measures new-information flux between a prompt and a response: the
//! fraction of the response's unique vocabulary that did not appear in
//! the prompt. A pure function of two strings; never fails.

use serde::{Deserialize, Serialize};
use turnlens_core::token_set;

/// Classification of the information boundary between prompt and response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    /// Response carries no tokens at all
    Null,
    /// Mostly shared vocabulary (score < transitional cutoff)
    Continuous,
    /// Mixed vocabulary
    Transitional,
    /// Mostly new vocabulary (score >= transformational cutoff)
    Transformational,
}

impl std::fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryKind::Null => write!(f, "null"),
            BoundaryKind::Continuous => write!(f, "continuous"),
            BoundaryKind::Transitional => write!(f, "transitional"),
            BoundaryKind::Transformational => write!(f, "transformational"),
        }
    }
}

/// Measurements from a single boundary analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryMetrics {
    /// New-token fraction in [0, 1]; 0.0 iff the response has no tokens
    pub score: f64,
    /// Boundary classification derived from `score`
    pub kind: BoundaryKind,
    /// Unique response tokens absent from the prompt
    pub tokens_added: usize,
    /// Unique response tokens in total
    pub tokens_total: usize,
}

/// Boundary analyzer with named classification cutoffs.
///
/// Cutoff semantics: `score < transitional_cutoff` is continuous,
/// `score >= transformational_cutoff` is transformational, anything in
/// between is transitional. Both bounds are empirical calibration values.
#[derive(Debug, Clone)]
pub struct BoundaryAnalyzer {
    /// Lower cutoff; scores below it classify as continuous
    pub transitional_cutoff: f64,
    /// Upper cutoff; scores at or above it classify as transformational
    pub transformational_cutoff: f64,
}

impl Default for BoundaryAnalyzer {
    fn default() -> Self {
        Self {
            transitional_cutoff: 0.3,
            transformational_cutoff: 0.7,
        }
    }
}

impl BoundaryAnalyzer {
    /// Measure the information boundary between `prompt` and `response`.
    pub fn analyze(&self, prompt: &str, response: &str) -> BoundaryMetrics {
        let prompt_tokens = token_set(prompt);
        let response_tokens = token_set(response);

        let tokens_added = response_tokens.difference(&prompt_tokens).count();
        let tokens_total = response_tokens.len();

        if tokens_total == 0 {
            return BoundaryMetrics {
                score: 0.0,
                kind: BoundaryKind::Null,
                tokens_added: 0,
                tokens_total: 0,
            };
        }

        let score = tokens_added as f64 / tokens_total as f64;
        let kind = if score < self.transitional_cutoff {
            BoundaryKind::Continuous
        } else if score < self.transformational_cutoff {
            BoundaryKind::Transitional
        } else {
            BoundaryKind::Transformational
        };

        BoundaryMetrics {
            score,
            kind,
            tokens_added,
            tokens_total,
        }
    }
}
