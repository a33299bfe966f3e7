//! Detector Models
//!
//! Data structures recorded per analyzed turn: the full `Observation`,
//! the four-indicator bundle that drives the detection decision, and the
//! reduced `EmergenceEvent` snapshot logged on detection. Field names are
//! part of the exported report format and must stay stable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use turnlens_metrics::{
    BoundaryMetrics, CoherenceMetrics, PatternSignature, PhaseMetrics, ResonanceMetrics,
};

/// The per-metric measurement bundle for one turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurements {
    /// New-information flux between prompt and response
    pub boundary: BoundaryMetrics,
    /// Shared-vocabulary overlap and turn-over-turn delta
    pub coherence: CoherenceMetrics,
    /// Sentence-length rhythm within the response
    pub resonance: ResonanceMetrics,
    /// Order parameter relative to the critical point
    pub phase: PhaseMetrics,
}

/// The four boolean emergence indicators evaluated per observation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Indicators {
    /// Boundary score above the transformation threshold
    pub boundary_transformation: bool,
    /// Coherence delta above the shift threshold
    pub coherence_shift: bool,
    /// Resonance strength above the resonance threshold
    pub resonance_detected: bool,
    /// Order parameter within the critical distance
    pub phase_transition: bool,
}

impl Indicators {
    /// Number of indicators currently true.
    pub fn active_count(&self) -> usize {
        [
            self.boundary_transformation,
            self.coherence_shift,
            self.resonance_detected,
            self.phase_transition,
        ]
        .iter()
        .filter(|&&flag| flag)
        .count()
    }

    /// Detection rule: at least three of the four indicators are true.
    pub fn is_detection(&self) -> bool {
        self.active_count() >= 3
    }
}

/// One fully analyzed conversational turn. Immutable once appended to a
/// detector's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Timestamp of the analysis
    pub timestamp: DateTime<Utc>,
    /// Caller-supplied turn index (not validated for monotonicity)
    pub turn: u32,
    /// Prompt text as analyzed
    pub prompt: String,
    /// Response text as analyzed
    pub response: String,
    /// Per-metric measurement bundle
    pub measurements: Measurements,
    /// The four emergence indicators
    pub indicators: Indicators,
    /// Whether an emergence pattern was detected on this turn
    pub detected: bool,
    /// Categorical signature of the response
    pub pattern: PatternSignature,
    /// Whether the literal marker tag appeared in the response
    pub has_marker: bool,
}

/// Reduced measurement snapshot carried by an [`EmergenceEvent`].
///
/// The external plotting collaborator consumes `turn` plus
/// `measurements.boundary`; this shape is a published contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EventMeasurements {
    /// Boundary score at detection time
    pub boundary: f64,
    /// Coherence value at detection time
    pub coherence: f64,
    /// Resonance strength at detection time
    pub resonance: f64,
    /// Order parameter at detection time
    pub order_parameter: f64,
}

/// A snapshot recorded only when an observation's `detected` flag is true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergenceEvent {
    /// Timestamp copied from the observation
    pub timestamp: DateTime<Utc>,
    /// Turn index copied from the observation
    pub turn: u32,
    /// Pattern signature copied from the observation
    pub pattern: PatternSignature,
    /// Reduced measurement snapshot
    pub measurements: EventMeasurements,
}

impl EmergenceEvent {
    /// Build the reduced snapshot from a detected observation.
    pub fn from_observation(obs: &Observation) -> Self {
        Self {
            timestamp: obs.timestamp,
            turn: obs.turn,
            pattern: obs.pattern,
            measurements: EventMeasurements {
                boundary: obs.measurements.boundary.score,
                coherence: obs.measurements.coherence.coherence,
                resonance: obs.measurements.resonance.strength,
                order_parameter: obs.measurements.phase.order_parameter,
            },
        }
    }
}
