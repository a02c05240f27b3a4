//! Metrics collection for consistency checks

use crate::report::{ConsistencyReport, Severity};
use std::collections::HashMap;

/// Metrics accumulated across consistency checks
#[derive(Debug, Clone, Default)]
pub struct AuditMetrics {
    /// Issues found per severity, summed over every check
    pub issues: HashMap<Severity, usize>,

    /// Completed checks
    pub check_count: usize,

    /// Score of the most recent check
    pub last_score: Option<u8>,

    /// Lowest score seen
    pub lowest_score: Option<u8>,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u64,
}

impl AuditMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished check
    pub fn record_check(&mut self, report: &ConsistencyReport) {
        self.check_count += 1;
        for (severity, count) in [
            (Severity::Critical, report.critical_count),
            (Severity::Warning, report.warning_count),
            (Severity::Info, report.info_count),
        ] {
            if count > 0 {
                *self.issues.entry(severity).or_insert(0) += count;
            }
        }
        self.last_score = Some(report.overall_score);
        self.lowest_score = Some(
            self.lowest_score
                .map_or(report.overall_score, |s| s.min(report.overall_score)),
        );
    }

    /// Issues of one severity across all checks
    pub fn issues_of(&self, severity: Severity) -> usize {
        self.issues.get(&severity).copied().unwrap_or(0)
    }

    /// Issues across all checks
    pub fn total_issues(&self) -> usize {
        self.issues.values().sum()
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let score = |s: Option<u8>| s.map_or_else(|| "n/a".to_string(), |s| s.to_string());
        let mut lines = vec![
            "Audit Metrics Summary".to_string(),
            "=====================".to_string(),
            format!("Checks run: {}", self.check_count),
            format!("Total runtime: {}ms", self.total_runtime_ms),
            format!("Last score: {}", score(self.last_score)),
            format!("Lowest score: {}", score(self.lowest_score)),
        ];

        if !self.issues.is_empty() {
            lines.push(String::new());
            lines.push("Issues by severity:".to_string());
            for severity in [Severity::Critical, Severity::Warning, Severity::Info] {
                lines.push(format!("  {}: {}", severity, self.issues_of(severity)));
            }
            lines.push(format!("  Total: {}", self.total_issues()));
        }

        lines.join("\n")
    }
}
