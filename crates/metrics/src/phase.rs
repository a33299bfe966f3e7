//! Phase Space Classification
//!
//! Combines the boundary score and coherence value into a single order
//! parameter and compares it against a fixed critical point. Proximity to
//! the critical point is one of the four emergence indicators.

use serde::{Deserialize, Serialize};

/// Which side of the critical point the order parameter falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Order parameter above the critical point
    Emergent,
    /// Order parameter at or below the critical point
    Baseline,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Emergent => write!(f, "emergent"),
            Phase::Baseline => write!(f, "baseline"),
        }
    }
}

/// Measurements from a single phase-space classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseMetrics {
    /// `boundary_score * coherence * order_scale`
    pub order_parameter: f64,
    /// The critical point the order parameter is compared against
    pub critical_point: f64,
    /// Absolute distance from the critical point
    pub distance_to_critical: f64,
    /// Whether the order parameter sits within the critical distance
    pub near_critical: bool,
    /// Phase label derived from the order parameter
    pub phase: Phase,
}

/// Phase-space classifier with named calibration constants.
///
/// All three values are empirical calibrations with no derivation; they
/// are exposed here so alternative calibrations stay testable.
#[derive(Debug, Clone)]
pub struct PhaseClassifier {
    /// Scale applied to `boundary_score * coherence`
    pub order_scale: f64,
    /// Critical point in phase space
    pub critical_point: f64,
    /// Distances below this count as near-critical
    pub critical_distance: f64,
}

impl Default for PhaseClassifier {
    fn default() -> Self {
        Self {
            order_scale: 2.5,
            critical_point: 1.75,
            critical_distance: 0.2,
        }
    }
}

impl PhaseClassifier {
    /// Classify the phase-space position for one turn's measurements.
    pub fn classify(&self, boundary_score: f64, coherence: f64) -> PhaseMetrics {
        let order_parameter = boundary_score * coherence * self.order_scale;
        let distance_to_critical = (order_parameter - self.critical_point).abs();

        PhaseMetrics {
            order_parameter,
            critical_point: self.critical_point,
            distance_to_critical,
            near_critical: distance_to_critical < self.critical_distance,
            phase: if order_parameter > self.critical_point {
                Phase::Emergent
            } else {
                Phase::Baseline
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_parameter_formula_is_exact() {
        let classifier = PhaseClassifier::default();
        for (boundary, coherence) in [(0.0, 0.0), (0.5, 0.5), (1.0, 1.0), (0.8, 0.9)] {
            let metrics = classifier.classify(boundary, coherence);
            assert_eq!(metrics.order_parameter, boundary * coherence * 2.5);
        }
    }

    #[test]
    fn test_near_critical_window() {
        let classifier = PhaseClassifier::default();

        // 0.8 * 0.8 * 2.5 = 1.6, distance 0.15 -> near critical
        let metrics = classifier.classify(0.8, 0.8);
        assert!(metrics.near_critical);

        // 0.5 * 0.5 * 2.5 = 0.625, distance 1.125 -> not near
        let metrics = classifier.classify(0.5, 0.5);
        assert!(!metrics.near_critical);
    }

    #[test]
    fn test_phase_labels() {
        let classifier = PhaseClassifier::default();

        // 1.0 * 0.8 * 2.5 = 2.0 > 1.75 -> emergent
        assert_eq!(classifier.classify(1.0, 0.8).phase, Phase::Emergent);

        // 0.7 * 1.0 * 2.5 = 1.75, not strictly above -> baseline
        assert_eq!(classifier.classify(0.7, 1.0).phase, Phase::Baseline);

        assert_eq!(classifier.classify(0.1, 0.1).phase, Phase::Baseline);
    }

    #[test]
    fn test_custom_calibration() {
        let classifier = PhaseClassifier {
            order_scale: 1.0,
            critical_point: 0.5,
            critical_distance: 0.1,
        };
        let metrics = classifier.classify(0.6, 0.9);
        assert!((metrics.order_parameter - 0.54).abs() < 1e-12);
        assert!(metrics.near_critical);
        assert_eq!(metrics.phase, Phase::Emergent);
    }
}
