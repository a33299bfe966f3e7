//! Research Report Generation & Export
//!
//! Reduces a detector's observation history and event log into summary
//! statistics and textual findings. Reports are derived views: never
//! mutated in place, regenerated from the history on request. Export
//! serializes the report as pretty JSON, creating missing parent
//! directories and propagating any write failure; silent data loss is
//! unacceptable.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use turnlens_core::CoreResult;

use crate::detector::EmergenceDetector;
use crate::models::EmergenceEvent;

/// Framework identity fields carried in every exported report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Framework name
    pub framework: String,
    /// Framework version
    pub version: String,
    /// Methodology label
    pub methodology: String,
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self {
            framework: "Turnlens Emergence Pattern Detection".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            methodology: "Multi-metric emergence pattern analysis".to_string(),
        }
    }
}

/// Summary statistics over one observation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of analyzed turns
    pub total_observations: usize,
    /// Number of logged emergence events
    pub emergence_events: usize,
    /// `emergence_events / total_observations`, or 0.0 on empty history
    pub emergence_rate: f64,
    /// Observation count per pattern signature tag
    pub pattern_distribution: BTreeMap<String, usize>,
    /// Observations whose response carried the marker tag
    pub marker_count: usize,
}

/// The full research report document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchReport {
    /// Framework identity
    pub metadata: ReportMetadata,
    /// Summary statistics
    pub summary: ReportSummary,
    /// Ordered textual findings
    pub key_findings: Vec<String>,
    /// Every logged emergence event, in detection order
    pub raw_events: Vec<EmergenceEvent>,
}

impl EmergenceDetector {
    /// Reduce the current history and event log into a report.
    pub fn generate_report(&self) -> ResearchReport {
        let total = self.history().len();
        let events = self.events().len();

        let mut pattern_distribution = BTreeMap::new();
        for obs in self.history() {
            *pattern_distribution.entry(obs.pattern.to_string()).or_insert(0) += 1;
        }

        let marker_count = self.history().iter().filter(|obs| obs.has_marker).count();

        ResearchReport {
            metadata: ReportMetadata::default(),
            summary: ReportSummary {
                total_observations: total,
                emergence_events: events,
                emergence_rate: if total > 0 {
                    events as f64 / total as f64
                } else {
                    0.0
                },
                pattern_distribution,
                marker_count,
            },
            key_findings: self.generate_findings(),
            raw_events: self.events().to_vec(),
        }
    }

    /// Serialize the current report to `path` as pretty JSON.
    ///
    /// Creates missing parent directories. Any I/O or serialization
    /// failure propagates to the caller.
    pub fn export_report(&self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let report = self.generate_report();
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json)?;

        tracing::info!(
            path = %path.display(),
            observations = report.summary.total_observations,
            events = report.summary.emergence_events,
            "research report exported"
        );
        Ok(())
    }

    /// Ordered findings derived from the event log and history.
    fn generate_findings(&self) -> Vec<String> {
        let mut findings = Vec::new();

        if !self.events().is_empty() {
            let avg_boundary = self
                .events()
                .iter()
                .map(|event| event.measurements.boundary)
                .sum::<f64>()
                / self.events().len() as f64;
            findings.push(format!(
                "Emergence patterns show average boundary transformation score of {:.3}",
                avg_boundary
            ));

            let near_critical = self
                .history()
                .iter()
                .filter(|obs| obs.measurements.phase.near_critical)
                .count();
            if near_critical > 0 {
                findings.push(format!(
                    "Detected {} near-critical phase transitions in conversation dynamics",
                    near_critical
                ));
            }
        }

        if findings.is_empty() {
            findings.push("Insufficient data for findings".to_string());
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_report() {
        let detector = EmergenceDetector::new();
        let report = detector.generate_report();
        assert_eq!(report.summary.total_observations, 0);
        assert_eq!(report.summary.emergence_events, 0);
        assert_eq!(report.summary.emergence_rate, 0.0);
        assert!(report.summary.pattern_distribution.is_empty());
        assert_eq!(report.key_findings, vec!["Insufficient data for findings"]);
        assert!(report.raw_events.is_empty());
    }

    #[test]
    fn test_pattern_distribution_counts() {
        let mut detector = EmergenceDetector::new();
        detector.analyze("q", "this theory will hold", 0); // AAFC
        detector.analyze("q", "the cat sat down", 1); // CCDR
        detector.analyze("q", "the dog will bark", 2); // CCDR

        let report = detector.generate_report();
        assert_eq!(report.summary.pattern_distribution.get("AAFC"), Some(&1));
        assert_eq!(report.summary.pattern_distribution.get("CCDR"), Some(&2));
    }

    #[test]
    fn test_emergence_rate() {
        let mut detector = EmergenceDetector::new();
        detector.analyze("x y", "x q", 0);
        detector.analyze("a b", "a b n1 n2 n3. n4 n5 n6 n7 n8.", 1);

        let report = detector.generate_report();
        assert_eq!(report.summary.total_observations, 2);
        assert_eq!(report.summary.emergence_events, 1);
        assert_eq!(report.summary.emergence_rate, 0.5);
    }

    #[test]
    fn test_findings_after_detection() {
        let mut detector = EmergenceDetector::new();
        detector.analyze("x y", "x q", 0);
        detector.analyze("a b", "a b n1 n2 n3. n4 n5 n6 n7 n8.", 1);

        let report = detector.generate_report();
        assert!(report.key_findings[0]
            .contains("average boundary transformation score of 0.800"));
    }

    #[test]
    fn test_marker_count() {
        let mut detector = EmergenceDetector::new();
        detector.analyze("q", "tagged <4577> response", 0);
        detector.analyze("q", "plain response", 1);
        let report = detector.generate_report();
        assert_eq!(report.summary.marker_count, 1);
    }
}
