//! Emergence Detector
//!
//! The stateful heart of the pipeline: runs the four per-turn analyzers
//! and both classifiers over each (prompt, response) pair, evaluates the
//! four emergence indicators, and owns the observation history and event
//! log. Coherence deltas are computed against the previous observation in
//! this detector's history, so turns must be processed strictly in
//! sequence on a single instance; `&mut self` on the analysis path
//! enforces the single-writer discipline.

use chrono::{DateTime, Utc};

use turnlens_metrics::{
    classify_signature, BoundaryAnalyzer, CoherenceAnalyzer, PhaseClassifier, ResonanceAnalyzer,
};

use crate::models::{EmergenceEvent, Indicators, Measurements, Observation};
use crate::observer::DetectionObserver;

/// Literal marker tag tracked per observation (presence only, never
/// interpreted).
pub const DEFAULT_MARKER_TAG: &str = "<4577>";

/// Detection thresholds and analyzer calibrations.
///
/// All values are empirical calibration constants; they are fixed in the
/// base design but constructor-injectable so alternative calibrations
/// stay testable.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Boundary scores above this raise the boundary indicator
    pub boundary_transformation: f64,
    /// Coherence deltas above this raise the shift indicator
    pub coherence_delta: f64,
    /// Resonance strengths above this raise the resonance indicator
    pub resonance_threshold: f64,
    /// Literal substring tracked per observation
    pub marker_tag: String,
    /// Boundary analyzer calibration
    pub boundary: BoundaryAnalyzer,
    /// Coherence analyzer calibration
    pub coherence: CoherenceAnalyzer,
    /// Resonance analyzer calibration
    pub resonance: ResonanceAnalyzer,
    /// Phase-space classifier calibration
    pub phase: PhaseClassifier,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            boundary_transformation: 0.7,
            coherence_delta: 0.15,
            resonance_threshold: 0.8,
            marker_tag: DEFAULT_MARKER_TAG.to_string(),
            boundary: BoundaryAnalyzer::default(),
            coherence: CoherenceAnalyzer::default(),
            resonance: ResonanceAnalyzer::default(),
            phase: PhaseClassifier::default(),
        }
    }
}

/// Multi-metric emergence detector owning one observation history and one
/// append-only event log.
pub struct EmergenceDetector {
    config: DetectorConfig,
    history: Vec<Observation>,
    events: Vec<EmergenceEvent>,
    observers: Vec<Box<dyn DetectionObserver>>,
}

impl EmergenceDetector {
    /// Create a detector with the default calibration.
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    /// Create a detector with an explicit calibration.
    pub fn with_config(config: DetectorConfig) -> Self {
        Self {
            config,
            history: Vec::new(),
            events: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer notified on every detection.
    pub fn add_observer(&mut self, observer: Box<dyn DetectionObserver>) {
        self.observers.push(observer);
    }

    /// Analyze one conversational turn, timestamped now.
    pub fn analyze(&mut self, prompt: &str, response: &str, turn: u32) -> Observation {
        self.analyze_at(prompt, response, turn, Utc::now())
    }

    /// Analyze one conversational turn with a caller-supplied timestamp.
    ///
    /// Appends the observation to this detector's history; on detection,
    /// also appends an [`EmergenceEvent`] and notifies observers. Returns
    /// a copy of the recorded observation.
    pub fn analyze_at(
        &mut self,
        prompt: &str,
        response: &str,
        turn: u32,
        timestamp: DateTime<Utc>,
    ) -> Observation {
        let previous_coherence = self
            .history
            .last()
            .map(|obs| obs.measurements.coherence.coherence);

        let boundary = self.config.boundary.analyze(prompt, response);
        let coherence = self
            .config
            .coherence
            .analyze(prompt, response, previous_coherence);
        let resonance = self.config.resonance.analyze(response);
        let phase = self
            .config
            .phase
            .classify(boundary.score, coherence.coherence);

        let indicators = Indicators {
            boundary_transformation: boundary.score > self.config.boundary_transformation,
            coherence_shift: coherence.delta > self.config.coherence_delta,
            resonance_detected: resonance.strength > self.config.resonance_threshold,
            phase_transition: phase.near_critical,
        };
        let detected = indicators.is_detection();

        let observation = Observation {
            timestamp,
            turn,
            prompt: prompt.to_string(),
            response: response.to_string(),
            measurements: Measurements {
                boundary,
                coherence,
                resonance,
                phase,
            },
            indicators,
            detected,
            pattern: classify_signature(response),
            has_marker: response.contains(&self.config.marker_tag),
        };

        if detected {
            let event = EmergenceEvent::from_observation(&observation);
            for observer in &self.observers {
                observer.on_detection(&event);
            }
            self.events.push(event);
        }

        self.history.push(observation.clone());
        observation
    }

    /// All observations in processing order.
    pub fn history(&self) -> &[Observation] {
        &self.history
    }

    /// All emergence events in detection order.
    pub fn events(&self) -> &[EmergenceEvent] {
        &self.events
    }

    /// The active calibration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }
}

impl Default for EmergenceDetector {
    fn default() -> Self {
        Self::new()
    }
}
