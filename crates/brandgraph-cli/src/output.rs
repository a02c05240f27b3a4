//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use brandgraph_advisor::{Priority, Suggestion};
use brandgraph_auditor::{ConsistencyReport, Severity};
use brandgraph_domain::{Relationship, RelationshipStatus};
use brandgraph_gatekeeper::{DecisionGateResult, DecisionStatus, DecisionStatusInfo, GateStatus};
use brandgraph_impact::{ImpactAnalysis, RelationshipStats, RiskLevel};
use colored::*;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format relationships.
    pub fn format_relationships(&self, relationships: &[Relationship]) -> Result<String> {
        match self.format {
            OutputFormat::Json => json(&relationships),
            OutputFormat::Quiet => Ok(lines(relationships.iter().map(|r| r.id.to_string()))),
            OutputFormat::Table => {
                if relationships.is_empty() {
                    return Ok(self.colorize("No relationships found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Source", "Relation", "Target", "Strength", "Status"]);
                for rel in relationships {
                    builder.push_record([
                        rel.id.to_string(),
                        format!("{} ({})", rel.source_name, rel.source_type),
                        rel.relation_type.to_string(),
                        format!("{} ({})", rel.target_name, rel.target_type),
                        rel.strength.to_string(),
                        self.relationship_status(rel.status),
                    ]);
                }
                Ok(table(builder))
            }
        }
    }

    /// Format an impact analysis.
    pub fn format_impact(&self, analysis: &ImpactAnalysis) -> Result<String> {
        match self.format {
            OutputFormat::Json => json(analysis),
            OutputFormat::Quiet => Ok(analysis.risk_level.to_string()),
            OutputFormat::Table => {
                let mut out = vec![
                    format!(
                        "Impact of changing {} ({})",
                        analysis.entity_name,
                        analysis.entity_type
                    ),
                    format!("Risk level: {}", self.risk(analysis.risk_level)),
                    format!(
                        "Affected: {} direct, {} indirect, {} total",
                        analysis.direct_impacts(),
                        analysis.indirect_impacts(),
                        analysis.total_affected()
                    ),
                    format!("Estimated update time: {}", analysis.estimated_update_time),
                    String::new(),
                ];
                if !analysis.direct.is_empty() {
                    out.push(self.format_relationships(&analysis.direct)?);
                    out.push(String::new());
                }
                out.push("Recommendations:".to_string());
                out.extend(analysis.recommendations.iter().map(|r| format!("  - {}", r)));
                Ok(out.join("\n"))
            }
        }
    }

    /// Format a consistency report.
    pub fn format_report(&self, report: &ConsistencyReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => json(report),
            OutputFormat::Quiet => Ok(report.overall_score.to_string()),
            OutputFormat::Table => {
                let mut out = vec![format!(
                    "Health score: {}/100 ({} critical, {} warning, {} info)",
                    self.score(report.overall_score),
                    report.critical_count,
                    report.warning_count,
                    report.info_count
                )];
                if report.is_clean() {
                    out.push(self.success("No consistency issues found"));
                    return Ok(out.join("\n"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Severity", "Issue", "Suggested action", "Auto-fix"]);
                for issue in &report.issues {
                    builder.push_record([
                        self.severity(issue.severity),
                        issue.title.clone(),
                        issue.suggested_action.clone(),
                        if issue.auto_fixable { "yes" } else { "no" }.to_string(),
                    ]);
                }
                out.push(table(builder));
                Ok(out.join("\n"))
            }
        }
    }

    /// Format relationship statistics.
    pub fn format_stats(&self, stats: &RelationshipStats) -> Result<String> {
        match self.format {
            OutputFormat::Json => json(stats),
            OutputFormat::Quiet => Ok(stats.total_relationships.to_string()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Metric", "Value"]);
                builder.push_record(["Relationships".to_string(), stats.total_relationships.to_string()]);
                for (relation_type, count) in &stats.by_type {
                    builder.push_record([format!("  {}", relation_type), count.to_string()]);
                }
                builder.push_record([
                    "Strong / medium / weak".to_string(),
                    format!(
                        "{} / {} / {}",
                        stats.by_strength.strong, stats.by_strength.medium, stats.by_strength.weak
                    ),
                ]);
                builder.push_record([
                    "Average connections".to_string(),
                    format!("{:.1}", stats.average_connections),
                ]);
                if let Some(most) = &stats.most_connected {
                    builder.push_record([
                        "Most connected".to_string(),
                        format!("{} ({})", most.entity.name, most.connections),
                    ]);
                }
                if let Some(least) = &stats.least_connected {
                    builder.push_record([
                        "Least connected".to_string(),
                        format!("{} ({})", least.entity.name, least.connections),
                    ]);
                }
                builder.push_record([
                    "Orphaned entities".to_string(),
                    stats.orphaned_entities.len().to_string(),
                ]);
                builder.push_record([
                    "AI-suggested / user-created".to_string(),
                    format!("{} / {}", stats.auto_generated_count, stats.user_created_count),
                ]);
                Ok(table(builder))
            }
        }
    }

    /// Format suggestions.
    pub fn format_suggestions(&self, suggestions: &[Suggestion]) -> Result<String> {
        match self.format {
            OutputFormat::Json => json(&suggestions),
            OutputFormat::Quiet => Ok(lines(suggestions.iter().map(|s| s.id.clone()))),
            OutputFormat::Table => {
                if suggestions.is_empty() {
                    return Ok(self.success("Nothing to suggest right now"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Priority", "Suggestion", "Action", "Time"]);
                for s in suggestions {
                    let mut priority = self.priority(s.priority);
                    if s.urgent {
                        priority.push_str(" !");
                    }
                    builder.push_record([
                        s.id.clone(),
                        priority,
                        format!("{}\n{}", s.title, s.description),
                        s.action.clone(),
                        s.estimated_time.clone(),
                    ]);
                }
                Ok(table(builder))
            }
        }
    }

    /// Format a decision status.
    pub fn format_status(&self, name: &str, info: &DecisionStatusInfo) -> Result<String> {
        match self.format {
            OutputFormat::Json => json(info),
            OutputFormat::Quiet => Ok(info.status.to_string()),
            OutputFormat::Table => {
                let mut out = vec![
                    format!(
                        "{}: {} ({}% coverage)",
                        name,
                        self.decision(info.status),
                        info.coverage
                    ),
                    info.recommendation.clone(),
                    info.risk.clone(),
                ];
                if !info.missing_top_methods.is_empty() {
                    let missing: Vec<_> = info.missing_top_methods.iter().map(|m| m.label()).collect();
                    out.push(format!("Missing top methods: {}", missing.join(", ")));
                }
                out.push("Next steps:".to_string());
                out.extend(info.next_steps.iter().map(|s| format!("  - {}", s)));
                Ok(out.join("\n"))
            }
        }
    }

    /// Format a decision gate verdict.
    pub fn format_gate(&self, result: &DecisionGateResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => json(result),
            OutputFormat::Quiet => Ok(result.status.to_string()),
            OutputFormat::Table => {
                let mut out = vec![format!("{} {}", self.gate(result.status), result.message)];
                if !result.failed_items.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["Entity", "Type", "Coverage", "Status", "Missing method"]);
                    for item in &result.failed_items {
                        builder.push_record([
                            item.name.clone(),
                            item.entity_type.to_string(),
                            format!("{}%", item.coverage),
                            self.decision(item.status),
                            item.missing_top_method
                                .map(|m| m.label().to_string())
                                .unwrap_or_default(),
                        ]);
                    }
                    out.push(table(builder));
                }
                Ok(out.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn risk(&self, level: RiskLevel) -> String {
        let color = match level {
            RiskLevel::Low => "green",
            RiskLevel::Medium => "yellow",
            RiskLevel::High | RiskLevel::Critical => "red",
        };
        self.colorize(level.as_str(), color)
    }

    fn score(&self, score: u8) -> String {
        let color = match score {
            80..=100 => "green",
            50..=79 => "yellow",
            _ => "red",
        };
        self.colorize(&score.to_string(), color)
    }

    fn severity(&self, severity: Severity) -> String {
        let color = match severity {
            Severity::Critical => "red",
            Severity::Warning => "yellow",
            Severity::Info => "blue",
        };
        self.colorize(severity.as_str(), color)
    }

    fn priority(&self, priority: Priority) -> String {
        let color = match priority {
            Priority::Critical => "red",
            Priority::High => "magenta",
            Priority::Medium => "yellow",
            Priority::Low => "cyan",
        };
        self.colorize(priority.as_str(), color)
    }

    fn decision(&self, status: DecisionStatus) -> String {
        let color = match status {
            DecisionStatus::SafeToDecide => "green",
            DecisionStatus::DecisionAtRisk => "yellow",
            DecisionStatus::Blocked => "red",
        };
        self.colorize(status.as_str(), color)
    }

    fn gate(&self, status: GateStatus) -> String {
        match status {
            GateStatus::Safe => self.colorize("[safe]", "green"),
            GateStatus::AtRisk => self.colorize("[at-risk]", "yellow"),
            GateStatus::Blocked => self.colorize("[blocked]", "red"),
        }
    }

    fn relationship_status(&self, status: RelationshipStatus) -> String {
        match status {
            RelationshipStatus::Conflict => self.colorize(status.as_str(), "red"),
            RelationshipStatus::Proposed => self.colorize(status.as_str(), "cyan"),
            _ => status.as_str().to_string(),
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn lines(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join("\n")
}

fn table(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandgraph_auditor::ReportSummary;
    use brandgraph_domain::{EntityType, NewRelationship, RelationType, RelationshipId, Strength};

    fn relationship() -> Relationship {
        NewRelationship::between(
            (EntityType::BrandAsset, "1", "Golden Circle"),
            (EntityType::Persona, "p-1", "Sarah"),
            RelationType::Targets,
            Strength::Strong,
        )
        .into_relationship(RelationshipId::new("rel-1"), 0)
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_relationships(&[relationship()]).unwrap();
        assert!(output.contains("\"relation_type\": \"targets\""));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_relationships(&[relationship()]).unwrap();
        assert_eq!(output, "rel-1");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_relationships(&[relationship()]).unwrap();
        assert!(output.contains("Relation"));
        assert!(output.contains("Sarah (persona)"));
    }

    #[test]
    fn test_empty_relationships() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_relationships(&[]).unwrap();
        assert!(output.contains("No relationships found"));
    }

    #[test]
    fn test_clean_report() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let report = ConsistencyReport::new(Vec::new(), ReportSummary::default(), 0);
        let output = formatter.format_report(&report).unwrap();
        assert!(output.contains("Health score: 100/100"));
        assert!(output.contains("✓ No consistency issues found"));

        let quiet = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(quiet.format_report(&report).unwrap(), "100");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("test"), "⚠ test");
    }
}
