//! Coherence Landscape Analysis
//!
//! Measures how much of the prompt's vocabulary reappears in the response,
//! and how far that overlap moved since the previous turn. The analyzer
//! itself is pure; the caller supplies the previous turn's coherence value
//! (the detector reads it from its owned history), which keeps the
//! turn-sequential invariant in exactly one place.

use serde::{Deserialize, Serialize};
use turnlens_core::token_set;

/// Stability of the coherence landscape between consecutive turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    /// Delta below the stability threshold
    Stable,
    /// Delta at or above the stability threshold
    Shifting,
}

impl std::fmt::Display for Stability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stability::Stable => write!(f, "stable"),
            Stability::Shifting => write!(f, "shifting"),
        }
    }
}

/// Measurements from a single coherence analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoherenceMetrics {
    /// Fraction of prompt vocabulary shared with the response, in [0, 1];
    /// exactly 0.5 when the prompt has no tokens (neutral default)
    pub coherence: f64,
    /// Absolute change from the previous turn's coherence; 0.0 for the
    /// first observation in a history
    pub delta: f64,
    /// Stability label derived from `delta`
    pub stability: Stability,
}

/// Coherence analyzer with a named stability threshold.
#[derive(Debug, Clone)]
pub struct CoherenceAnalyzer {
    /// Deltas below this value label the landscape stable
    pub stability_threshold: f64,
    /// Coherence reported when the prompt has no tokens
    pub neutral_coherence: f64,
}

impl Default for CoherenceAnalyzer {
    fn default() -> Self {
        Self {
            stability_threshold: 0.1,
            neutral_coherence: 0.5,
        }
    }
}

impl CoherenceAnalyzer {
    /// Measure coherence between `prompt` and `response`.
    ///
    /// `previous` is the coherence value of the immediately preceding
    /// observation in the same history, or `None` when this is the first.
    pub fn analyze(&self, prompt: &str, response: &str, previous: Option<f64>) -> CoherenceMetrics {
        let prompt_tokens = token_set(prompt);

        let coherence = if prompt_tokens.is_empty() {
            self.neutral_coherence
        } else {
            let response_tokens = token_set(response);
            let shared = prompt_tokens.intersection(&response_tokens).count();
            shared as f64 / prompt_tokens.len() as f64
        };

        let delta = match previous {
            Some(prev) => (coherence - prev).abs(),
            None => 0.0,
        };

        let stability = if delta < self.stability_threshold {
            Stability::Stable
        } else {
            Stability::Shifting
        };

        CoherenceMetrics {
            coherence,
            delta,
            stability,
        }
    }
}
