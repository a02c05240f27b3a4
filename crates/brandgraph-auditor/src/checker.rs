//! Consistency checker: runs every rule scan and scores the result

use crate::report::{ConsistencyIssue, ConsistencyReport, ReportSummary};
use crate::rules::{ScanContext, RULES};
use crate::AuditConfig;
use brandgraph_domain::{
    current_timestamp, AnchorRules, EntityKey, EntityReference, EntityRegistry, EntityStatus,
    RelationType, Relationship, RelationshipStatus, RelationshipStore, Strength,
};
use brandgraph_impact::RelationshipStats;
use std::collections::HashMap;

/// Audits the whole graph for structural and semantic problems
///
/// # Examples
///
/// ```
/// use brandgraph_auditor::ConsistencyChecker;
/// use brandgraph_domain::EntityRegistry;
/// use brandgraph_store::MemoryRelationshipStore;
///
/// let store = MemoryRelationshipStore::new();
/// let registry = EntityRegistry::default();
/// let report = ConsistencyChecker::new(&store, &registry).check();
/// assert_eq!(report.overall_score, 100);
/// assert!(report.issues.is_empty());
/// ```
pub struct ConsistencyChecker<'a, S> {
    store: &'a S,
    registry: &'a EntityRegistry,
    config: AuditConfig,
    anchors: AnchorRules,
}

impl<'a, S: RelationshipStore> ConsistencyChecker<'a, S> {
    /// Create a checker with default configuration
    pub fn new(store: &'a S, registry: &'a EntityRegistry) -> Self {
        Self {
            store,
            registry,
            config: AuditConfig::default(),
            anchors: AnchorRules::default(),
        }
    }

    /// Use a custom configuration
    pub fn with_config(mut self, config: AuditConfig) -> Self {
        self.config = config;
        self
    }

    /// Use custom anchor rules
    pub fn with_anchors(mut self, anchors: AnchorRules) -> Self {
        self.anchors = anchors;
        self
    }

    /// Run every scan against the current clock
    pub fn check(&self) -> ConsistencyReport {
        self.check_at(current_timestamp())
    }

    /// Run every scan as of `now`
    ///
    /// The store is read once; every scan sees the same snapshot.
    pub fn check_at(&self, now: u64) -> ConsistencyReport {
        let relationships = self.store.all();
        let ctx = ScanContext {
            relationships: &relationships,
            registry: self.registry,
            config: &self.config,
            anchors: &self.anchors,
            now,
        };

        let mut issues: Vec<ConsistencyIssue> = Vec::new();
        for (name, rule) in RULES {
            let found = rule(&ctx);
            tracing::debug!(rule = name, issues = found.len(), "Rule scan finished");
            issues.extend(found);
        }

        let summary = self.summarize(&relationships, now);
        let report = ConsistencyReport::new(issues, summary, now);

        tracing::info!(
            score = report.overall_score,
            critical = report.critical_count,
            warning = report.warning_count,
            info = report.info_count,
            "Consistency check completed"
        );

        report
    }

    fn summarize(&self, relationships: &[Relationship], now: u64) -> ReportSummary {
        let stats = RelationshipStats::from_relationships(relationships, self.registry);
        let recent_cutoff = now.saturating_sub(self.config.recent_window_secs());

        ReportSummary {
            strongest_entity: stats.most_connected.map(|c| c.entity),
            weakest_entity: stats.least_connected.map(|c| c.entity),
            most_conflicts: most_conflicted(relationships),
            recently_updated: self
                .registry
                .iter()
                .filter(|e| e.last_updated_at > recent_cutoff)
                .take(self.config.recently_updated_limit)
                .map(|e| {
                    EntityReference::to_entity(e, RelationType::References, Strength::Medium)
                        .with_last_updated(e.last_updated_at)
                })
                .collect(),
            needs_attention: self
                .registry
                .with_status(EntityStatus::ReadyToValidate)
                .map(|e| EntityReference::to_entity(e, RelationType::Validates, Strength::Medium))
                .collect(),
        }
    }
}

/// Source entity of the most `conflict` edges, first encountered on ties
fn most_conflicted(relationships: &[Relationship]) -> Option<EntityReference> {
    let mut order: Vec<EntityReference> = Vec::new();
    let mut counts: HashMap<EntityKey, usize> = HashMap::new();

    for rel in relationships
        .iter()
        .filter(|r| r.status == RelationshipStatus::Conflict)
    {
        let count = counts.entry(rel.source_key()).or_insert(0);
        if *count == 0 {
            order.push(rel.source_reference());
        }
        *count += 1;
    }

    let mut best: Option<(usize, EntityReference)> = None;
    for reference in order {
        let count = counts.get(&reference.key()).copied().unwrap_or_default();
        if best.as_ref().map_or(true, |(max, _)| count > *max) {
            best = Some((count, reference));
        }
    }
    best.map(|(_, reference)| reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandgraph_domain::{Entity, EntityType, NewRelationship};
    use brandgraph_store::MemoryRelationshipStore;

    const NOW: u64 = 1_750_000_000;

    fn conflict(store: &mut MemoryRelationshipStore, source: &str, target: &str) {
        store.create(
            NewRelationship::between(
                (EntityType::BrandAsset, source, source),
                (EntityType::Persona, target, target),
                RelationType::ConflictsWith,
                Strength::Medium,
            )
            .with_status(RelationshipStatus::Conflict),
        );
    }

    #[test]
    fn test_clean_graph_scores_100() {
        let store = MemoryRelationshipStore::new();
        let registry = EntityRegistry::default();
        let report = ConsistencyChecker::new(&store, &registry).check_at(NOW);

        assert_eq!(report.overall_score, 100);
        assert_eq!(report.total_issues, 0);
        assert!(report.summary.strongest_entity.is_none());
    }

    #[test]
    fn test_conflicts_dominate_ordering() {
        let mut store = MemoryRelationshipStore::new();
        conflict(&mut store, "a", "p-1");
        let registry = EntityRegistry::new(vec![
            Entity::new(EntityType::BrandAsset, "a", "a").updated_at(NOW),
            Entity::new(EntityType::BrandAsset, "lonely", "Lonely").updated_at(NOW),
        ]);

        let report = ConsistencyChecker::new(&store, &registry).check_at(NOW);
        assert_eq!(report.critical_count, 1);
        assert_eq!(report.info_count, 1);
        assert_eq!(report.overall_score, 75);
        assert_eq!(report.issues[0].id.split('-').next(), Some("conflict"));
        assert_eq!(report.issues[1].id, "orphan-brand-asset-lonely");
    }

    #[test]
    fn test_most_conflicted_counts_sources_only() {
        let mut store = MemoryRelationshipStore::new();
        conflict(&mut store, "a", "p-1");
        conflict(&mut store, "b", "p-1");
        conflict(&mut store, "b", "p-2");
        let registry = EntityRegistry::default();

        let report = ConsistencyChecker::new(&store, &registry).check_at(NOW);
        let most = report.summary.most_conflicts.unwrap();
        assert_eq!(most.id.as_str(), "b");
        assert_eq!(most.entity_type, EntityType::BrandAsset);
    }

    #[test]
    fn test_summary_recent_and_attention() {
        let store = MemoryRelationshipStore::new();
        let mut entities: Vec<Entity> = (0..7)
            .map(|i| Entity::new(EntityType::Persona, format!("p-{}", i), "recent").updated_at(NOW - 60))
            .collect();
        entities.push(
            Entity::new(EntityType::BrandAsset, "old", "old")
                .updated_at(NOW - 2 * 86_400)
                .with_status(EntityStatus::ReadyToValidate),
        );
        let registry = EntityRegistry::new(entities);

        let report = ConsistencyChecker::new(&store, &registry).check_at(NOW);
        assert_eq!(report.summary.recently_updated.len(), 5);
        assert_eq!(report.summary.needs_attention.len(), 1);
        assert_eq!(report.summary.needs_attention[0].id.as_str(), "old");
    }
}
