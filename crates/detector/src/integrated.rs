//! Integrated Detector
//!
//! Stateful wrapper over [`ToolIntegrator`]: keeps its own ordered
//! observation list and emergence-event list, decides emergence purely on
//! the meta score, and exports its accumulated data independently of the
//! multi-metric detector. The two pipelines share per-turn input but no
//! state.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use turnlens_core::CoreResult;

use crate::integrator::{IntegratedAnalysis, IntegrationStatus, ToolIntegrator};

/// One turn as recorded by the integrated pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegratedObservation {
    /// Timestamp of the analysis
    pub timestamp: DateTime<Utc>,
    /// Caller-supplied turn index
    pub turn: u32,
    /// Full integrator output for this turn
    pub analysis: IntegratedAnalysis,
    /// The meta score the emergence decision was made on
    pub emergence_score: f64,
    /// Whether the meta score crossed the emergence threshold
    pub detected: bool,
    /// Whether the marker tag appeared in the response
    pub has_marker: bool,
}

/// Export document for the integrated pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegratedExport {
    /// Counts over the accumulated data
    pub metadata: IntegratedExportMetadata,
    /// Every recorded observation, in processing order
    pub observations: Vec<IntegratedObservation>,
}

/// Counts carried in the integrated export document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegratedExportMetadata {
    /// Number of analyzed turns
    pub total_observations: usize,
    /// Number of turns that crossed the emergence threshold
    pub emergence_events: usize,
}

/// Detector over the integrated meta-score pipeline.
pub struct IntegratedDetector {
    integrator: ToolIntegrator,
    observations: Vec<IntegratedObservation>,
    events: Vec<IntegratedObservation>,
}

impl IntegratedDetector {
    /// Create a detector over the default integrator.
    pub fn new() -> Self {
        Self::with_integrator(ToolIntegrator::new())
    }

    /// Create a detector over an explicitly configured integrator.
    pub fn with_integrator(integrator: ToolIntegrator) -> Self {
        Self {
            integrator,
            observations: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Analyze one conversational turn, timestamped now.
    pub fn analyze(&mut self, prompt: &str, response: &str, turn: u32) -> IntegratedObservation {
        self.analyze_at(prompt, response, turn, Utc::now())
    }

    /// Analyze one conversational turn with a caller-supplied timestamp.
    pub fn analyze_at(
        &mut self,
        prompt: &str,
        response: &str,
        turn: u32,
        timestamp: DateTime<Utc>,
    ) -> IntegratedObservation {
        let analysis = self.integrator.analyze(prompt, response);
        let has_marker = response.contains(&self.integrator.config().marker_tag);

        let observation = IntegratedObservation {
            timestamp,
            turn,
            emergence_score: analysis.meta_score,
            detected: analysis.emergent,
            has_marker,
            analysis,
        };

        if observation.detected {
            tracing::info!(
                turn = observation.turn,
                score = observation.emergence_score,
                pattern = %observation.analysis.pattern,
                "integrated emergence detected"
            );
            self.events.push(observation.clone());
        }

        self.observations.push(observation.clone());
        observation
    }

    /// Capability availability of the underlying integrator.
    pub fn status(&self) -> IntegrationStatus {
        self.integrator.status()
    }

    /// All recorded observations, in processing order.
    pub fn observations(&self) -> &[IntegratedObservation] {
        &self.observations
    }

    /// Observations that crossed the emergence threshold.
    pub fn events(&self) -> &[IntegratedObservation] {
        &self.events
    }

    /// Serialize the accumulated data to `path` as pretty JSON.
    ///
    /// Creates missing parent directories; any failure propagates.
    pub fn export(&self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let export = IntegratedExport {
            metadata: IntegratedExportMetadata {
                total_observations: self.observations.len(),
                emergence_events: self.events.len(),
            },
            observations: self.observations.clone(),
        };
        let json = serde_json::to_string_pretty(&export)?;
        fs::write(path, json)?;

        tracing::info!(
            path = %path.display(),
            observations = export.metadata.total_observations,
            "integrated analysis exported"
        );
        Ok(())
    }
}

impl Default for IntegratedDetector {
    fn default() -> Self {
        Self::new()
    }
}
