//! Turnlens Detector
//!
//! Stateful emergence detection over conversational turns. Two parallel
//! pipelines share per-turn input but no state:
//!
//! - `detector` - Multi-metric pipeline: four analyzers + two classifiers
//!   feed a four-indicator detection decision over an owned history
//! - `integrator` - Pluggable-analyzer wrapper: probes optional
//!   capabilities once, degrades gracefully, computes the meta score
//! - `integrated` - Stateful detector over the integrator pipeline
//! - `models` - Observation, indicator, and event types
//! - `observer` - Detection notification abstraction
//! - `report` - Research report generation and JSON export
//!
//! Everything is single-threaded and synchronous; analysis does no I/O.
//! Export is a separate, explicit operation that propagates failures.

pub mod detector;
pub mod integrated;
pub mod integrator;
pub mod models;
pub mod observer;
pub mod report;

// Re-export detector types
pub use detector::{DetectorConfig, EmergenceDetector, DEFAULT_MARKER_TAG};

// Re-export models
pub use models::{EmergenceEvent, EventMeasurements, Indicators, Measurements, Observation};

// Re-export observers
pub use observer::{DetectionObserver, TracingObserver};

// Re-export reporting
pub use report::{ReportMetadata, ReportSummary, ResearchReport};

// Re-export integration
pub use integrated::{IntegratedDetector, IntegratedExport, IntegratedObservation};
pub use integrator::{
    default_probes, Capability, CapabilityProbe, CapabilityStatus, FallbackBoundary,
    IntegratedAnalysis, IntegrationStatus, IntegratorConfig, ToolIntegrator,
};
