//! Turnlens Metrics
//!
//! Independent per-turn text-statistics analyzers and classifiers. Each
//! analyzer is a small config-carrying struct with a `Default` calibration
//! and a pure analysis method; none of them hold conversation state. The
//! one history-dependent value (coherence delta) is threaded in explicitly
//! by the caller.
//!
//! - `boundary` - New-information flux between prompt and response
//! - `coherence` - Shared-vocabulary overlap and its turn-over-turn delta
//! - `resonance` - Rhythmic regularity of sentence lengths
//! - `phase` - Order parameter relative to a fixed critical point
//! - `signature` - Keyword-based categorical tag

pub mod boundary;
pub mod coherence;
pub mod phase;
pub mod resonance;
pub mod signature;

pub use boundary::{BoundaryAnalyzer, BoundaryKind, BoundaryMetrics};
pub use coherence::{CoherenceAnalyzer, CoherenceMetrics, Stability};
pub use phase::{Phase, PhaseClassifier, PhaseMetrics};
pub use resonance::{ResonanceAnalyzer, ResonanceKind, ResonanceMetrics};
pub use signature::{classify_signature, PatternSignature};
