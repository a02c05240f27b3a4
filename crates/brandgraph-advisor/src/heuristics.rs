//! The seven suggestion heuristics
//!
//! Each heuristic looks at the registry, the relationship snapshot and the
//! latest consistency report, and emits its suggestions independently.

use crate::suggestion::{Impact, Priority, Suggestion, SuggestionKind, SuggestionStat};
use crate::AdvisorConfig;
use brandgraph_auditor::ConsistencyReport;
use brandgraph_domain::clock::days_before;
use brandgraph_domain::{
    AnchorRules, Entity, EntityKey, EntityReference, EntityRegistry, EntityStatus, EntityType,
    RelationType, Relationship, Strength,
};
use std::collections::HashSet;

/// Everything a heuristic may read
pub struct AdviceContext<'a> {
    /// Entity registries
    pub registry: &'a EntityRegistry,
    /// Relationship snapshot
    pub relationships: &'a [Relationship],
    /// Latest consistency report
    pub report: &'a ConsistencyReport,
    /// Thresholds
    pub config: &'a AdvisorConfig,
    /// Anchor roles and successions
    pub anchors: &'a AnchorRules,
    /// Evaluation time
    pub now: u64,
}

/// A suggestion heuristic
pub type Heuristic = fn(&AdviceContext<'_>) -> Vec<Suggestion>;

/// Every heuristic, in evaluation order
pub const HEURISTICS: [(&str, Heuristic); 7] = [
    ("sequential-completion", sequential_completion as Heuristic),
    ("missing-relationships", missing_relationships as Heuristic),
    ("research-diversity", research_diversity as Heuristic),
    ("consistency-escalation", consistency_escalation as Heuristic),
    ("stale-data", stale_data as Heuristic),
    ("validation-opportunities", validation_opportunities as Heuristic),
    ("low-coverage", low_coverage as Heuristic),
];

fn references(
    entities: &[&Entity],
    relation_type: RelationType,
    strength: Strength,
) -> Vec<EntityReference> {
    entities
        .iter()
        .map(|e| EntityReference::to_entity(e, relation_type, strength))
        .collect()
}

fn slug(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// "Finish X, then start Y" for each succession, plus the first persona
pub fn sequential_completion(ctx: &AdviceContext<'_>) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let anchor_type = ctx.anchors.anchor_type;

    for succession in &ctx.anchors.successions {
        let Some(predecessor) = ctx.registry.find_kind(anchor_type, &succession.predecessor) else {
            continue;
        };
        if predecessor.status != EntityStatus::Validated {
            continue;
        }
        let successor = ctx.registry.find_kind(anchor_type, &succession.successor);
        if successor.is_some_and(|s| s.status != EntityStatus::NotStarted) {
            continue;
        }

        suggestions.push(Suggestion {
            id: format!("suggest-{}", slug(&succession.successor)),
            kind: SuggestionKind::NextAsset,
            priority: Priority::High,
            urgent: false,
            title: format!("Create Your {}", succession.successor),
            description: format!(
                "Now that {} is validated, defining your {} is the natural next step.",
                predecessor.name, succession.successor
            ),
            action: format!("Create {}", succession.successor),
            reasoning: format!(
                "{} builds directly on the foundation set by your {}",
                succession.successor, succession.predecessor
            ),
            estimated_time: "15-30 minutes".to_string(),
            estimated_impact: Impact::High,
            stats: None,
            related_entities: references(&[predecessor], RelationType::Informs, Strength::Strong),
            dismissible: true,
        });
    }

    let validated = ctx.registry.with_status(EntityStatus::Validated).count();
    let has_personas = ctx.registry.of_type(EntityType::Persona).next().is_some();
    if validated >= ctx.config.first_persona_min_validated && !has_personas {
        suggestions.push(Suggestion {
            id: "suggest-first-persona".to_string(),
            kind: SuggestionKind::NextAsset,
            priority: Priority::High,
            urgent: false,
            title: "Create Your First Persona".to_string(),
            description:
                "You have strong brand foundations - now define who you serve with target personas."
                    .to_string(),
            action: "Create Persona".to_string(),
            reasoning: "Personas help you apply your brand strategy to real customer segments"
                .to_string(),
            estimated_time: "30 minutes".to_string(),
            estimated_impact: Impact::High,
            stats: None,
            related_entities: Vec::new(),
            dismissible: true,
        });
    }

    suggestions
}

/// Anchor not yet linked to every persona
pub fn missing_relationships(ctx: &AdviceContext<'_>) -> Vec<Suggestion> {
    let Some(anchor) = ctx.anchors.anchor(ctx.registry) else {
        return Vec::new();
    };
    let personas: Vec<&Entity> = ctx.registry.of_type(EntityType::Persona).collect();
    if personas.is_empty() {
        return Vec::new();
    }

    let linked: HashSet<EntityKey> = ctx
        .relationships
        .iter()
        .filter_map(|r| r.other_side(anchor.entity_type, &anchor.id))
        .filter(|other| other.entity_type == EntityType::Persona)
        .map(|other| other.key())
        .collect();
    let unlinked: Vec<&Entity> = personas
        .into_iter()
        .filter(|p| !linked.contains(&p.key()))
        .collect();

    if unlinked.is_empty() {
        return Vec::new();
    }

    vec![Suggestion {
        id: "link-personas-anchor".to_string(),
        kind: SuggestionKind::Relationship,
        priority: Priority::Medium,
        urgent: false,
        title: format!("Connect {} to All Personas", anchor.name),
        description: format!(
            "{} persona(s) are not yet connected to your {}",
            unlinked.len(),
            anchor.name
        ),
        action: "Review Connections".to_string(),
        reasoning: "Linking your core brand purpose to personas ensures consistent messaging"
            .to_string(),
        estimated_time: "10 minutes".to_string(),
        estimated_impact: Impact::Medium,
        stats: Some(SuggestionStat::new("Unlinked personas", unlinked.len())),
        related_entities: references(&unlinked, RelationType::Targets, Strength::Medium),
        dismissible: true,
    }]
}

/// Entities in progress that rely on a single completed research method
pub fn research_diversity(ctx: &AdviceContext<'_>) -> Vec<Suggestion> {
    let single: Vec<&Entity> = ctx
        .registry
        .iter()
        .filter(|e| e.status != EntityStatus::NotStarted && e.completed_methods().count() == 1)
        .collect();

    if single.is_empty() {
        return Vec::new();
    }

    vec![Suggestion {
        id: "diversify-research".to_string(),
        kind: SuggestionKind::Research,
        priority: Priority::Medium,
        urgent: false,
        title: "Strengthen Research with Multiple Methods".to_string(),
        description: format!("{} entities rely on only one research method", single.len()),
        action: "Add Research Methods".to_string(),
        reasoning: "Using 3+ research methods increases validation confidence by 40%".to_string(),
        estimated_time: "1-2 hours per entity".to_string(),
        estimated_impact: Impact::High,
        stats: Some(SuggestionStat::new("Entities at risk", single.len())),
        related_entities: references(&single, RelationType::Validates, Strength::Weak),
        dismissible: true,
    }]
}

/// One urgent suggestion for critical issues, otherwise one for warnings
pub fn consistency_escalation(ctx: &AdviceContext<'_>) -> Vec<Suggestion> {
    let report = ctx.report;

    if report.critical_count > 0 {
        return vec![Suggestion {
            id: "fix-critical-issues".to_string(),
            kind: SuggestionKind::Warning,
            priority: Priority::Critical,
            urgent: true,
            title: "Resolve Critical Brand Inconsistencies".to_string(),
            description: format!(
                "{} critical conflict(s) detected between your entities",
                report.critical_count
            ),
            action: "Review Issues".to_string(),
            reasoning:
                "Inconsistent brand messaging confuses audiences and dilutes brand strength"
                    .to_string(),
            estimated_time: "30-60 minutes".to_string(),
            estimated_impact: Impact::High,
            stats: Some(SuggestionStat::new("Critical issues", report.critical_count)),
            related_entities: Vec::new(),
            dismissible: false,
        }];
    }

    if report.warning_count > 0 {
        return vec![Suggestion {
            id: "fix-warnings".to_string(),
            kind: SuggestionKind::Warning,
            priority: Priority::Medium,
            urgent: false,
            title: "Address Brand Consistency Warnings".to_string(),
            description: format!(
                "{} potential issue(s) detected in your entities",
                report.warning_count
            ),
            action: "Review Warnings".to_string(),
            reasoning: "Addressing these warnings will improve overall brand coherence"
                .to_string(),
            estimated_time: "15-30 minutes".to_string(),
            estimated_impact: Impact::Medium,
            stats: Some(SuggestionStat::new("Warnings", report.warning_count)),
            related_entities: Vec::new(),
            dismissible: true,
        }];
    }

    Vec::new()
}

/// Validated entities not modified within the staleness window
pub fn stale_data(ctx: &AdviceContext<'_>) -> Vec<Suggestion> {
    let cutoff = days_before(ctx.now, ctx.config.stale_after_days);
    let stale: Vec<&Entity> = ctx
        .registry
        .with_status(EntityStatus::Validated)
        .filter(|e| e.last_updated_at < cutoff)
        .collect();

    if stale.is_empty() {
        return Vec::new();
    }

    vec![Suggestion {
        id: "refresh-stale".to_string(),
        kind: SuggestionKind::Maintenance,
        priority: Priority::Low,
        urgent: false,
        title: "Refresh Outdated Entities".to_string(),
        description: format!(
            "{} entities haven't been updated in {}+ days",
            stale.len(),
            ctx.config.stale_after_days
        ),
        action: "Review & Update".to_string(),
        reasoning: "Markets evolve - refreshing brand assets keeps you competitive and relevant"
            .to_string(),
        estimated_time: "15 minutes per entity".to_string(),
        estimated_impact: Impact::Medium,
        stats: Some(SuggestionStat::new("Stale entities", stale.len())),
        related_entities: stale
            .iter()
            .map(|e| {
                EntityReference::to_entity(e, RelationType::References, Strength::Medium)
                    .with_last_updated(e.last_updated_at)
            })
            .collect(),
        dismissible: true,
    }]
}

/// Entities ready to validate, and well-covered entities awaiting review
pub fn validation_opportunities(ctx: &AdviceContext<'_>) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    let ready: Vec<&Entity> = ctx
        .registry
        .with_status(EntityStatus::ReadyToValidate)
        .collect();
    if !ready.is_empty() {
        suggestions.push(Suggestion {
            id: "validate-ready-assets".to_string(),
            kind: SuggestionKind::Opportunity,
            priority: Priority::High,
            urgent: false,
            title: "Validate Ready Entities".to_string(),
            description: format!(
                "{} entities have completed research and are ready for validation",
                ready.len()
            ),
            action: "Start Validation".to_string(),
            reasoning: "Validating these entities will increase your overall brand confidence score"
                .to_string(),
            estimated_time: "5-10 minutes per entity".to_string(),
            estimated_impact: Impact::High,
            stats: Some(SuggestionStat::new("Ready to validate", ready.len())),
            related_entities: references(&ready, RelationType::Validates, Strength::Strong),
            dismissible: true,
        });
    }

    let threshold = ctx.config.high_coverage_threshold;
    let high_coverage: Vec<&Entity> = ctx
        .registry
        .iter()
        .filter(|e| {
            e.research_coverage >= threshold
                && !matches!(
                    e.status,
                    EntityStatus::Validated | EntityStatus::ReadyToValidate
                )
        })
        .collect();
    if !high_coverage.is_empty() {
        suggestions.push(Suggestion {
            id: "validate-high-coverage".to_string(),
            kind: SuggestionKind::Opportunity,
            priority: Priority::Medium,
            urgent: false,
            title: "Entities Ready for Final Review".to_string(),
            description: format!(
                "{} entities have high research coverage ({}%+) but need final review",
                high_coverage.len(),
                threshold
            ),
            action: "Review for Validation".to_string(),
            reasoning: "These entities are well-researched and just need a final review to validate"
                .to_string(),
            estimated_time: "10 minutes per entity".to_string(),
            estimated_impact: Impact::Medium,
            stats: Some(SuggestionStat::new("High coverage", high_coverage.len())),
            related_entities: references(&high_coverage, RelationType::Validates, Strength::Medium),
            dismissible: true,
        });
    }

    suggestions
}

/// Critical, unvalidated entities with little research behind them
pub fn low_coverage(ctx: &AdviceContext<'_>) -> Vec<Suggestion> {
    let threshold = ctx.config.low_coverage_threshold;
    let weak: Vec<&Entity> = ctx
        .registry
        .iter()
        .filter(|e| {
            e.is_critical
                && e.research_coverage < threshold
                && e.status != EntityStatus::Validated
        })
        .collect();

    if weak.is_empty() {
        return Vec::new();
    }

    vec![Suggestion {
        id: "boost-critical-coverage".to_string(),
        kind: SuggestionKind::Research,
        priority: Priority::High,
        urgent: false,
        title: "Boost Research on Critical Entities".to_string(),
        description: format!(
            "{} critical entities have low research coverage (<{}%)",
            weak.len(),
            threshold
        ),
        action: "Start Research".to_string(),
        reasoning: "Critical brand assets need strong research backing to ensure credibility"
            .to_string(),
        estimated_time: "2-3 hours per entity".to_string(),
        estimated_impact: Impact::High,
        stats: Some(SuggestionStat::new("Critical entities", weak.len())),
        related_entities: references(&weak, RelationType::Validates, Strength::Strong),
        dismissible: true,
    }]
}
