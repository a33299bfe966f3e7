//! Tool Integration
//!
//! A parallel, independently-configured analysis pipeline that probes a
//! fixed set of optional sub-analyzer capabilities once at construction
//! and degrades gracefully per capability. A probe failure is captured in
//! the registry and logged; it never blocks the other probes or
//! construction itself, and a capability's unavailability is permanent
//! for the life of the integrator (no re-probing).
//!
//! Compatibility note: per-turn analysis computes the deterministic
//! fallback values for every capability regardless of probed
//! availability; availability only shows up in [`ToolIntegrator::status`].
//! This mirrors the reference behavior and is recorded as an open
//! question in DESIGN.md; do not "fix" it here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use turnlens_core::{shared_token_count, CoreResult};
use turnlens_metrics::{BoundaryKind, PatternSignature};

/// The five optional sub-analyzer capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Boundary transformation sub-analyzer
    Boundary,
    /// Semantic coherence sub-analyzer
    Coherence,
    /// Pattern signature sub-analyzer
    Pattern,
    /// Concrete-overflow sub-analyzer
    Overflow,
    /// Trust scoring sub-analyzer
    Trust,
}

impl Capability {
    /// Every capability, in probe order.
    pub const ALL: [Capability; 5] = [
        Capability::Boundary,
        Capability::Coherence,
        Capability::Pattern,
        Capability::Overflow,
        Capability::Trust,
    ];

    /// Stable lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Boundary => "boundary",
            Capability::Coherence => "coherence",
            Capability::Pattern => "pattern",
            Capability::Overflow => "overflow",
            Capability::Trust => "trust",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of a capability probe, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CapabilityStatus {
    /// Probe succeeded; `detail` describes the resolved analyzer
    Active { detail: String },
    /// Probe failed; `reason` records why
    Unavailable { reason: String },
}

impl CapabilityStatus {
    /// Whether the capability resolved successfully.
    pub fn is_active(&self) -> bool {
        matches!(self, CapabilityStatus::Active { .. })
    }
}

/// A capability probe: runs once at construction, either resolving a
/// description of the usable analyzer or failing with a captured error.
pub type CapabilityProbe = Box<dyn Fn() -> CoreResult<String> + Send + Sync>;

/// Capability availability report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationStatus {
    /// Per-capability probe outcomes, keyed by capability name
    pub capabilities: BTreeMap<String, CapabilityStatus>,
    /// Number of active capabilities
    pub active: usize,
    /// Number of probed capabilities
    pub total: usize,
}

/// Boundary fallback values computed per turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackBoundary {
    /// Length-based fallback score
    pub score: f64,
    /// Keyword-based fallback classification
    pub kind: BoundaryKind,
}

/// Full result of one integrated analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegratedAnalysis {
    /// Boundary fallback measurements
    pub boundary: FallbackBoundary,
    /// Shared-token coherence, capped at 1.0
    pub coherence: f64,
    /// Keyword-derived pattern signature
    pub pattern: PatternSignature,
    /// Whether abstract-overflow keywords were present
    pub overflow: bool,
    /// Marker-based trust score
    pub trust: f64,
    /// Mean of boundary score, coherence, and trust. Overflow and
    /// pattern are computed but intentionally excluded.
    pub meta_score: f64,
    /// Whether the meta score crossed the emergence threshold
    pub emergent: bool,
}

/// Calibration for the integrator's deterministic fallbacks.
#[derive(Debug, Clone)]
pub struct IntegratorConfig {
    /// Responses longer than this many chars take the long-response score
    pub long_response_chars: usize,
    /// Boundary score for long responses
    pub long_response_score: f64,
    /// Boundary score for short responses
    pub short_response_score: f64,
    /// Divisor applied to the shared-token count before capping at 1.0
    pub shared_token_divisor: f64,
    /// Trust score when the marker tag is present
    pub trust_with_marker: f64,
    /// Trust score otherwise
    pub trust_without_marker: f64,
    /// Meta scores above this count as emergence
    pub emergence_threshold: f64,
    /// Literal marker tag checked for trust scoring
    pub marker_tag: String,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            long_response_chars: 100,
            long_response_score: 0.8,
            short_response_score: 0.5,
            shared_token_divisor: 10.0,
            trust_with_marker: 0.7,
            trust_without_marker: 0.6,
            emergence_threshold: 0.7,
            marker_tag: crate::detector::DEFAULT_MARKER_TAG.to_string(),
        }
    }
}

/// Keywords that flip the fallback boundary kind to transformational.
const TRANSFORMATIONAL_KEYWORD: &str = "emergence";

/// Keywords mapped to the AAFC signature by the fallback pattern check.
const AAFC_KEYWORDS: [&str; 2] = ["abstract", "pattern"];

/// Keywords mapped to the CCDR signature by the fallback pattern check.
const CCDR_KEYWORDS: [&str; 2] = ["concrete", "specific"];

/// Keywords that raise the overflow flag.
const OVERFLOW_KEYWORDS: [&str; 4] = ["abstract", "concept", "theory", "pattern"];

/// Pluggable-analyzer wrapper computing the narrower meta-score pipeline.
pub struct ToolIntegrator {
    config: IntegratorConfig,
    registry: BTreeMap<Capability, CapabilityStatus>,
}

impl ToolIntegrator {
    /// Construct with the default probe set and calibration.
    pub fn new() -> Self {
        Self::with_probes(IntegratorConfig::default(), default_probes())
    }

    /// Construct with explicit probes, resolving each capability exactly
    /// once. Probe failures are captured per capability and never abort
    /// construction; capabilities without a registered probe are recorded
    /// as unavailable.
    pub fn with_probes(
        config: IntegratorConfig,
        probes: Vec<(Capability, CapabilityProbe)>,
    ) -> Self {
        let mut probe_map: BTreeMap<Capability, CapabilityProbe> = probes.into_iter().collect();
        let mut registry = BTreeMap::new();

        for capability in Capability::ALL {
            let status = match probe_map.remove(&capability) {
                Some(probe) => match probe() {
                    Ok(detail) => {
                        tracing::info!(capability = %capability, %detail, "capability active");
                        CapabilityStatus::Active { detail }
                    }
                    Err(err) => {
                        let reason = err.to_string();
                        tracing::warn!(capability = %capability, %reason, "capability degraded");
                        CapabilityStatus::Unavailable { reason }
                    }
                },
                None => {
                    tracing::warn!(capability = %capability, "no probe registered");
                    CapabilityStatus::Unavailable {
                        reason: "no probe registered".to_string(),
                    }
                }
            };
            registry.insert(capability, status);
        }

        Self { config, registry }
    }

    /// Per-capability availability report.
    pub fn status(&self) -> IntegrationStatus {
        let capabilities: BTreeMap<String, CapabilityStatus> = self
            .registry
            .iter()
            .map(|(capability, status)| (capability.name().to_string(), status.clone()))
            .collect();
        let active = capabilities.values().filter(|s| s.is_active()).count();

        IntegrationStatus {
            active,
            total: capabilities.len(),
            capabilities,
        }
    }

    /// Whether a single capability resolved at construction.
    pub fn is_available(&self, capability: Capability) -> bool {
        self.registry
            .get(&capability)
            .map(CapabilityStatus::is_active)
            .unwrap_or(false)
    }

    /// Run one integrated analysis pass over a turn.
    ///
    /// Always computes the deterministic fallback values, independent of
    /// probed availability (see module docs).
    pub fn analyze(&self, prompt: &str, response: &str) -> IntegratedAnalysis {
        let lower = response.to_lowercase();

        let boundary = FallbackBoundary {
            score: if response.chars().count() > self.config.long_response_chars {
                self.config.long_response_score
            } else {
                self.config.short_response_score
            },
            kind: if lower.contains(TRANSFORMATIONAL_KEYWORD) {
                BoundaryKind::Transformational
            } else {
                BoundaryKind::Continuous
            },
        };

        let shared = shared_token_count(prompt, response);
        let coherence = (shared as f64 / self.config.shared_token_divisor).min(1.0);

        let pattern = if AAFC_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            PatternSignature::Aafc
        } else if CCDR_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            PatternSignature::Ccdr
        } else {
            PatternSignature::Abfc
        };

        let overflow = OVERFLOW_KEYWORDS.iter().any(|kw| lower.contains(kw));

        let trust = if response.contains(&self.config.marker_tag) {
            self.config.trust_with_marker
        } else {
            self.config.trust_without_marker
        };

        let meta_score = (boundary.score + coherence + trust) / 3.0;

        IntegratedAnalysis {
            boundary,
            coherence,
            pattern,
            overflow,
            trust,
            meta_score,
            emergent: meta_score > self.config.emergence_threshold,
        }
    }

    /// The active calibration.
    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }
}

impl Default for ToolIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

/// The default probe set, mirroring the reference deployment: the
/// boundary and trust backends are known-unavailable, the remaining
/// three resolve to the built-in keyword analyzers.
pub fn default_probes() -> Vec<(Capability, CapabilityProbe)> {
    use turnlens_core::CoreError;

    vec![
        (
            Capability::Boundary,
            Box::new(|| Err(CoreError::capability("upstream analyzer has a known defect")))
                as CapabilityProbe,
        ),
        (
            Capability::Coherence,
            Box::new(|| Ok("lexical overlap analyzer".to_string())),
        ),
        (
            Capability::Pattern,
            Box::new(|| Ok("keyword signature analyzer".to_string())),
        ),
        (
            Capability::Overflow,
            Box::new(|| Ok("keyword overflow detector".to_string())),
        ),
        (
            Capability::Trust,
            Box::new(|| Err(CoreError::capability("no scoring backend found"))),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnlens_core::CoreError;

    fn ok_probe(detail: &'static str) -> CapabilityProbe {
        Box::new(move || Ok(detail.to_string()))
    }

    fn failing_probe(reason: &'static str) -> CapabilityProbe {
        Box::new(move || Err(CoreError::capability(reason)))
    }

    #[test]
    fn test_default_probe_status() {
        let integrator = ToolIntegrator::new();
        let status = integrator.status();
        assert_eq!(status.total, 5);
        assert_eq!(status.active, 3);
        assert!(!integrator.is_available(Capability::Boundary));
        assert!(integrator.is_available(Capability::Coherence));
        assert!(!integrator.is_available(Capability::Trust));
    }

    #[test]
    fn test_probe_failure_never_blocks_construction() {
        let probes: Vec<(Capability, CapabilityProbe)> = Capability::ALL
            .into_iter()
            .map(|cap| (cap, failing_probe("backend missing")))
            .collect();
        let integrator = ToolIntegrator::with_probes(IntegratorConfig::default(), probes);
        let status = integrator.status();
        assert_eq!(status.active, 0);
        // Analysis still produces the full fallback result
        let analysis = integrator.analyze("a", "b");
        assert!(analysis.meta_score > 0.0);
    }

    #[test]
    fn test_one_failure_leaves_others_active() {
        let probes = vec![
            (Capability::Boundary, failing_probe("broken")),
            (Capability::Coherence, ok_probe("c")),
            (Capability::Pattern, ok_probe("p")),
            (Capability::Overflow, ok_probe("o")),
            (Capability::Trust, ok_probe("t")),
        ];
        let integrator = ToolIntegrator::with_probes(IntegratorConfig::default(), probes);
        assert_eq!(integrator.status().active, 4);
        assert!(!integrator.is_available(Capability::Boundary));
    }

    #[test]
    fn test_boundary_fallback_scores() {
        let integrator = ToolIntegrator::new();
        let long_response = "word ".repeat(30); // 150 chars
        assert_eq!(integrator.analyze("q", &long_response).boundary.score, 0.8);
        assert_eq!(integrator.analyze("q", "short").boundary.score, 0.5);
    }

    #[test]
    fn test_boundary_kind_keyed_on_emergence_keyword() {
        let integrator = ToolIntegrator::new();
        assert_eq!(
            integrator.analyze("q", "signs of Emergence here").boundary.kind,
            BoundaryKind::Transformational
        );
        assert_eq!(
            integrator.analyze("q", "nothing notable").boundary.kind,
            BoundaryKind::Continuous
        );
    }

    #[test]
    fn test_coherence_caps_at_one() {
        let integrator = ToolIntegrator::new();
        // 4 shared tokens / 10
        let analysis = integrator.analyze("a b c d", "a b c d");
        assert_eq!(analysis.coherence, 0.4);

        // 12 shared tokens would exceed 1.0 without the cap
        let shared = "t1 t2 t3 t4 t5 t6 t7 t8 t9 t10 t11 t12";
        let analysis = integrator.analyze(shared, shared);
        assert_eq!(analysis.coherence, 1.0);
    }

    #[test]
    fn test_fallback_pattern_mapping() {
        let integrator = ToolIntegrator::new();
        assert_eq!(
            integrator.analyze("q", "an abstract idea").pattern,
            PatternSignature::Aafc
        );
        assert_eq!(
            integrator.analyze("q", "a specific example").pattern,
            PatternSignature::Ccdr
        );
        assert_eq!(
            integrator.analyze("q", "plain talk").pattern,
            PatternSignature::Abfc
        );
    }

    #[test]
    fn test_overflow_keywords() {
        let integrator = ToolIntegrator::new();
        assert!(integrator.analyze("q", "a new theory emerges").overflow);
        assert!(!integrator.analyze("q", "lunch was fine").overflow);
    }

    #[test]
    fn test_trust_follows_marker() {
        let integrator = ToolIntegrator::new();
        assert_eq!(integrator.analyze("q", "tagged <4577> here").trust, 0.7);
        assert_eq!(integrator.analyze("q", "untagged").trust, 0.6);
    }

    #[test]
    fn test_meta_score_is_mean_of_three() {
        let integrator = ToolIntegrator::new();
        let analysis = integrator.analyze("a b c d", "a b c d");
        let expected = (analysis.boundary.score + analysis.coherence + analysis.trust) / 3.0;
        assert!((analysis.meta_score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_meta_score_ignores_overflow_and_pattern() {
        let integrator = ToolIntegrator::new();
        // Same boundary/coherence/trust inputs, different pattern/overflow
        let with_keywords = integrator.analyze("q", "abstract theory");
        let without = integrator.analyze("q", "plainly spoken");
        assert_ne!(with_keywords.overflow, without.overflow);
        assert_ne!(with_keywords.pattern, without.pattern);
        assert_eq!(with_keywords.meta_score, without.meta_score);
    }

    #[test]
    fn test_marked_long_response_scenario() {
        // Marker present and > 100 chars: boundary 0.8, trust 0.7
        let integrator = ToolIntegrator::new();
        let response = format!("<4577> {}", "filler ".repeat(20));
        let analysis = integrator.analyze("q", &response);
        assert_eq!(analysis.boundary.score, 0.8);
        assert_eq!(analysis.trust, 0.7);
        // (0.8 + 0.0 + 0.7) / 3 = 0.5 -> below the emergence threshold
        assert!(!analysis.emergent);
    }

    #[test]
    fn test_emergence_threshold_is_strict() {
        let integrator = ToolIntegrator::new();
        // boundary 0.8, coherence 1.0, trust 0.7 -> meta 0.8333 -> emergent
        let prompt = "t1 t2 t3 t4 t5 t6 t7 t8 t9 t10";
        let response = format!("{} {}", prompt, "pad ".repeat(20));
        let analysis = integrator.analyze(prompt, &response);
        assert_eq!(analysis.coherence, 1.0);
        assert!(analysis.emergent);
    }
}
