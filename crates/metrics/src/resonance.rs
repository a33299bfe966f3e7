//! Resonance Pattern Analysis
//!
//! Measures the rhythmic regularity of sentence lengths inside a response.
//! Low variance in words-per-sentence reads as high resonance. Fewer than
//! two usable sentences cannot establish a rhythm and score 0.0.

use serde::{Deserialize, Serialize};
use turnlens_core::sentence_units;

/// Classification of the sentence-length rhythm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResonanceKind {
    /// Not enough sentences to establish a rhythm
    None,
    /// Highly regular rhythm (strength > harmonic cutoff)
    Harmonic,
    /// Some regularity (strength > partial cutoff)
    Partial,
    /// Irregular rhythm
    Chaotic,
}

impl std::fmt::Display for ResonanceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResonanceKind::None => write!(f, "none"),
            ResonanceKind::Harmonic => write!(f, "harmonic"),
            ResonanceKind::Partial => write!(f, "partial"),
            ResonanceKind::Chaotic => write!(f, "chaotic"),
        }
    }
}

/// Measurements from a single resonance analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResonanceMetrics {
    /// Rhythm strength in (0, 1], or 0.0 when no rhythm can be measured
    pub strength: f64,
    /// Mean sentence length in words (the average "wavelength")
    pub frequency: f64,
    /// Rhythm classification derived from `strength`
    pub kind: ResonanceKind,
    /// Population standard deviation of sentence lengths
    pub variance: f64,
}

impl ResonanceMetrics {
    fn none() -> Self {
        Self {
            strength: 0.0,
            frequency: 0.0,
            kind: ResonanceKind::None,
            variance: 0.0,
        }
    }
}

/// Resonance analyzer with named classification cutoffs.
#[derive(Debug, Clone)]
pub struct ResonanceAnalyzer {
    /// Strengths above this classify as harmonic
    pub harmonic_cutoff: f64,
    /// Strengths above this (but not harmonic) classify as partial
    pub partial_cutoff: f64,
}

impl Default for ResonanceAnalyzer {
    fn default() -> Self {
        Self {
            harmonic_cutoff: 0.8,
            partial_cutoff: 0.5,
        }
    }
}

impl ResonanceAnalyzer {
    /// Measure sentence-length rhythm within `response`.
    pub fn analyze(&self, response: &str) -> ResonanceMetrics {
        let lengths: Vec<usize> = sentence_units(response)
            .into_iter()
            .filter(|unit| !unit.trim().is_empty())
            .map(|unit| unit.split_whitespace().count())
            .collect();

        // A single sentence has no rhythm to measure.
        if lengths.len() < 2 {
            return ResonanceMetrics::none();
        }

        let n = lengths.len() as f64;
        let mean = lengths.iter().sum::<usize>() as f64 / n;
        let variance = lengths
            .iter()
            .map(|&len| {
                let diff = len as f64 - mean;
                diff * diff
            })
            .sum::<f64>()
            / n;
        let std = variance.sqrt();

        let strength = if mean > 0.0 { 1.0 / (1.0 + std / mean) } else { 0.0 };

        let kind = if strength > self.harmonic_cutoff {
            ResonanceKind::Harmonic
        } else if strength > self.partial_cutoff {
            ResonanceKind::Partial
        } else {
            ResonanceKind::Chaotic
        };

        ResonanceMetrics {
            strength,
            frequency: mean,
            kind,
            variance: std,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sentence_has_no_resonance() {
        let analyzer = ResonanceAnalyzer::default();
        for response in ["one single sentence", "one single sentence.", ""] {
            let metrics = analyzer.analyze(response);
            assert_eq!(metrics.strength, 0.0);
            assert_eq!(metrics.frequency, 0.0);
            assert_eq!(metrics.kind, ResonanceKind::None);
        }
    }

    #[test]
    fn test_identical_lengths_are_harmonic() {
        // Three sentences of three words each: zero variance, strength 1.0
        let metrics = ResonanceAnalyzer::default().analyze("a b c. d e f. g h i.");
        assert_eq!(metrics.strength, 1.0);
        assert_eq!(metrics.frequency, 3.0);
        assert_eq!(metrics.kind, ResonanceKind::Harmonic);
        assert_eq!(metrics.variance, 0.0);
    }

    #[test]
    fn test_mixed_lengths_are_partial() {
        // Lengths 1 and 9: mean 5, population std 4, strength 1/(1+0.8)
        let metrics = ResonanceAnalyzer::default().analyze("a. b c d e f g h i j.");
        assert!((metrics.strength - 1.0 / 1.8).abs() < 1e-12);
        assert_eq!(metrics.kind, ResonanceKind::Partial);
    }

    #[test]
    fn test_std_above_mean_is_chaotic() {
        // Lengths 1, 1, 10: std exceeds the mean, strength below 0.5
        let metrics = ResonanceAnalyzer::default().analyze("a. b. c d e f g h i j k l.");
        assert!(metrics.strength < 0.5);
        assert_eq!(metrics.kind, ResonanceKind::Chaotic);
    }

    #[test]
    fn test_population_std_not_sample_std() {
        // Lengths 2 and 4: mean 3, population std 1 (sample std would be sqrt(2))
        let metrics = ResonanceAnalyzer::default().analyze("a b. c d e f.");
        assert_eq!(metrics.variance, 1.0);
        assert!((metrics.strength - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_strength_bounded_by_one() {
        let metrics = ResonanceAnalyzer::default().analyze("w x. y z. a b. c d e f g h i j.");
        assert!(metrics.strength > 0.0);
        assert!(metrics.strength <= 1.0);
    }
}
