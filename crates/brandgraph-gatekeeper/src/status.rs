//! Per-entity decision status

use crate::GateConfig;
use brandgraph_domain::{Entity, MethodKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How safe it is to base strategic decisions on an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionStatus {
    /// Enough validated research
    SafeToDecide,
    /// Usable, but with gaps
    DecisionAtRisk,
    /// Too little research to decide on
    #[serde(alias = "do-not-decide")]
    Blocked,
}

impl DecisionStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::SafeToDecide => "safe-to-decide",
            DecisionStatus::DecisionAtRisk => "decision-at-risk",
            DecisionStatus::Blocked => "blocked",
        }
    }
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision status with the reasoning behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionStatusInfo {
    /// Classification
    pub status: DecisionStatus,
    /// Research coverage the classification is based on
    pub coverage: u8,
    /// Best-ranked methods still to complete, best first
    pub missing_top_methods: Vec<MethodKind>,
    /// Methods already completed
    pub completed_methods: Vec<MethodKind>,
    /// Whether every best-ranked method is completed
    pub top_methods_completed: bool,
    /// What to do about it
    pub recommendation: String,
    /// What deciding now would risk
    pub risk: String,
    /// Concrete next actions
    pub next_steps: Vec<String>,
}

/// Classify an entity by its research coverage
///
/// Coverage below `blocked_below` blocks, coverage at or above `safe_at`
/// is safe, anything in between is at risk. The best-ranked methods the
/// entity still lacks are reported alongside as the cheapest way up.
///
/// # Examples
///
/// ```
/// use brandgraph_domain::{Entity, EntityType};
/// use brandgraph_gatekeeper::{calculate_decision_status, DecisionStatus, GateConfig};
///
/// let asset = Entity::new(EntityType::BrandAsset, "1", "Golden Circle").with_coverage(45);
/// let info = calculate_decision_status(&asset, &GateConfig::default());
/// assert_eq!(info.status, DecisionStatus::Blocked);
/// ```
pub fn calculate_decision_status(entity: &Entity, config: &GateConfig) -> DecisionStatusInfo {
    let coverage = entity.research_coverage.min(100);
    let missing_top_methods = missing_top_methods(entity, config.top_methods);
    let top_methods_completed = missing_top_methods.is_empty();
    let completed_methods = entity.completed_methods().map(|m| m.method).collect();

    let status = if coverage < config.blocked_below {
        DecisionStatus::Blocked
    } else if coverage >= config.safe_at {
        DecisionStatus::SafeToDecide
    } else {
        DecisionStatus::DecisionAtRisk
    };

    let (recommendation, risk, next_steps) = match status {
        DecisionStatus::SafeToDecide => (
            "You have sufficient validated research to make confident strategic decisions."
                .to_string(),
            "Minimal risk - your decisions are backed by comprehensive research.".to_string(),
            vec![
                "Proceed with confidence to strategy tools".to_string(),
                "Consider additional validation if needed".to_string(),
                "Document key insights before strategizing".to_string(),
            ],
        ),
        DecisionStatus::DecisionAtRisk => {
            let (recommendation, risk) = if top_methods_completed {
                (
                    format!(
                        "Increase research coverage to {}% for fully validated decisions.",
                        config.safe_at
                    ),
                    "Moderate risk - decisions may lack depth without additional research."
                        .to_string(),
                )
            } else {
                (
                    format!(
                        "Complete the highest-ranked research methods ({}) for better decision quality.",
                        join_labels(&missing_top_methods, ", ")
                    ),
                    "Moderate risk - missing critical strategic research methods.".to_string(),
                )
            };
            let first_step = if top_methods_completed {
                "Complete remaining research methods".to_string()
            } else {
                format!("Complete {}", join_labels(&missing_top_methods, " and "))
            };
            (
                recommendation,
                risk,
                vec![
                    first_step,
                    format!("Reach {}% coverage for safe decision-making", config.safe_at),
                    "Consider the strategic importance of missing methods".to_string(),
                ],
            )
        }
        DecisionStatus::Blocked => (
            "Critical: Complete core research before making strategic decisions.".to_string(),
            "High risk - decisions would be speculative without proper validation.".to_string(),
            vec![
                format!(
                    "Start with {} (highest strategic value)",
                    join_labels(&canonical_top(config.top_methods), " and ")
                ),
                format!("Reach minimum {}% research coverage", config.blocked_below),
                "Validate core assumptions before proceeding".to_string(),
            ],
        ),
    };

    DecisionStatusInfo {
        status,
        coverage,
        missing_top_methods,
        completed_methods,
        top_methods_completed,
        recommendation,
        risk,
        next_steps,
    }
}

/// Best-ranked methods listed on the entity that are not completed
///
/// An entity with no methods listed is missing the canonical top methods.
fn missing_top_methods(entity: &Entity, top: usize) -> Vec<MethodKind> {
    if entity.research_methods.is_empty() {
        return canonical_top(top);
    }

    let mut listed: Vec<_> = entity.research_methods.iter().collect();
    listed.sort_by_key(|m| m.method.rank());
    listed
        .into_iter()
        .take(top)
        .filter(|m| !m.is_completed())
        .map(|m| m.method)
        .collect()
}

fn canonical_top(top: usize) -> Vec<MethodKind> {
    MethodKind::RANKED.iter().take(top).copied().collect()
}

fn join_labels(methods: &[MethodKind], separator: &str) -> String {
    methods
        .iter()
        .map(|m| m.label())
        .collect::<Vec<_>>()
        .join(separator)
}
