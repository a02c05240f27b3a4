//! Consistency issues and the scored report

use brandgraph_domain::EntityReference;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious an issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// Informational
    Info,
    /// Should be looked at
    Warning,
    /// Blocks trust in the graph
    Critical,
}

impl Severity {
    /// Points subtracted from the health score per issue
    pub fn penalty(&self) -> u32 {
        match self {
            Severity::Critical => 20,
            Severity::Warning => 10,
            Severity::Info => 5,
        }
    }

    /// Get the severity name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which scan produced an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// A relationship marked as a conflict
    SemanticConflict,
    /// Critical entities not linked to the anchor
    MissingConnection,
    /// Connected entity not updated for a long time
    StaleReference,
    /// Anchor concepts missing from its partner text
    KeywordGap,
    /// Entity with no relationships at all
    OrphanedEntity,
}

impl IssueKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::SemanticConflict => "semantic-conflict",
            IssueKind::MissingConnection => "missing-connection",
            IssueKind::StaleReference => "stale-reference",
            IssueKind::KeywordGap => "keyword-gap",
            IssueKind::OrphanedEntity => "orphaned-entity",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule-scan finding
///
/// Recomputed on every check and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyIssue {
    /// Stable id derived from what was found
    pub id: String,
    /// Severity
    pub severity: Severity,
    /// Producing scan
    pub kind: IssueKind,
    /// One-line title
    pub title: String,
    /// Longer explanation
    pub description: String,
    /// Entities involved
    pub affected_entities: Vec<EntityReference>,
    /// What to do about it
    pub suggested_action: String,
    /// Whether the fix can be applied mechanically
    pub auto_fixable: bool,
    /// Sort key, higher first
    pub priority: u8,
    /// When the problem was observed
    pub detected_at: u64,
}

/// Highlights computed alongside the issues
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Entity with the most relationships
    pub strongest_entity: Option<EntityReference>,
    /// Connected entity with the fewest relationships
    pub weakest_entity: Option<EntityReference>,
    /// Entity that is the source of the most conflicts
    pub most_conflicts: Option<EntityReference>,
    /// Entities updated within the recent window
    pub recently_updated: Vec<EntityReference>,
    /// Entities waiting for validation
    pub needs_attention: Vec<EntityReference>,
}

/// Result of one consistency check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// Check time
    pub generated_at: u64,
    /// Number of issues
    pub total_issues: usize,
    /// Critical issues
    pub critical_count: usize,
    /// Warnings
    pub warning_count: usize,
    /// Informational issues
    pub info_count: usize,
    /// Health score, 0-100
    pub overall_score: u8,
    /// Issues, highest priority first
    pub issues: Vec<ConsistencyIssue>,
    /// Graph highlights
    pub summary: ReportSummary,
}

impl ConsistencyReport {
    /// Tally, score and order a batch of issues
    ///
    /// Issues with equal priority keep the order they were found in.
    pub fn new(mut issues: Vec<ConsistencyIssue>, summary: ReportSummary, generated_at: u64) -> Self {
        let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();
        let critical_count = count(Severity::Critical);
        let warning_count = count(Severity::Warning);
        let info_count = count(Severity::Info);

        issues.sort_by(|a, b| b.priority.cmp(&a.priority));

        Self {
            generated_at,
            total_issues: issues.len(),
            critical_count,
            warning_count,
            info_count,
            overall_score: health_score(critical_count, warning_count, info_count),
            issues,
            summary,
        }
    }

    /// Whether the check found nothing
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues of one severity
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &ConsistencyIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }
}

/// `100 - 20*critical - 10*warning - 5*info`, clamped to 0
///
/// # Examples
///
/// ```
/// use brandgraph_auditor::health_score;
///
/// assert_eq!(health_score(0, 0, 0), 100);
/// assert_eq!(health_score(1, 2, 1), 55);
/// assert_eq!(health_score(9, 0, 0), 0);
/// ```
pub fn health_score(critical: usize, warning: usize, info: usize) -> u8 {
    let penalty = [
        (critical, Severity::Critical),
        (warning, Severity::Warning),
        (info, Severity::Info),
    ]
    .iter()
    .fold(0u64, |acc, (count, severity)| {
        acc.saturating_add((*count as u64).saturating_mul(u64::from(severity.penalty())))
    });
    100u64.saturating_sub(penalty) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(id: &str, severity: Severity, priority: u8) -> ConsistencyIssue {
        ConsistencyIssue {
            id: id.to_string(),
            severity,
            kind: IssueKind::OrphanedEntity,
            title: id.to_string(),
            description: String::new(),
            affected_entities: Vec::new(),
            suggested_action: String::new(),
            auto_fixable: false,
            priority,
            detected_at: 0,
        }
    }

    #[test]
    fn test_empty_report_is_perfect() {
        let report = ConsistencyReport::new(Vec::new(), ReportSummary::default(), 1);
        assert_eq!(report.overall_score, 100);
        assert!(report.is_clean());
    }

    #[test]
    fn test_sorted_by_priority_stable() {
        let report = ConsistencyReport::new(
            vec![
                issue("orphan-a", Severity::Info, 4),
                issue("stale-a", Severity::Info, 3),
                issue("conflict-a", Severity::Critical, 10),
                issue("orphan-b", Severity::Info, 4),
            ],
            ReportSummary::default(),
            1,
        );
        let ids: Vec<_> = report.issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["conflict-a", "orphan-a", "orphan-b", "stale-a"]);
        assert_eq!(report.critical_count, 1);
        assert_eq!(report.info_count, 3);
        assert_eq!(report.overall_score, 65);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        assert_eq!(health_score(100, 100, 100), 0);
        assert_eq!(health_score(usize::MAX, 0, 0), 0);
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }
}
