//! Suggestions over a realistic brand graph, with durable dismissals

use brandgraph_advisor::{dismiss, filter_dismissed, AdvisorConfig, Priority, SuggestionEngine};
use brandgraph_auditor::ConsistencyChecker;
use brandgraph_domain::{
    Entity, EntityRegistry, EntityStatus, EntityType, MethodKind, MethodStatus, NewRelationship,
    RelationType, RelationshipStatus, RelationshipStore, Strength,
};
use brandgraph_store::{MemoryRelationshipStore, SqliteDismissalStore};
use tempfile::TempDir;

const NOW: u64 = 1_760_000_000;
const DAY: u64 = 86_400;

fn registry() -> EntityRegistry {
    EntityRegistry::new(vec![
        Entity::new(EntityType::BrandAsset, "1", "Golden Circle Framework")
            .with_kind("Golden Circle")
            .with_status(EntityStatus::Validated)
            .critical()
            .with_coverage(90)
            .updated_at(NOW - 200 * DAY)
            .with_method(MethodKind::Workshop, MethodStatus::Completed)
            .with_method(MethodKind::Interviews, MethodStatus::Completed),
        Entity::new(EntityType::BrandAsset, "2", "Brand Vision")
            .with_kind("Vision Statement")
            .with_status(EntityStatus::InProgress)
            .critical()
            .with_coverage(30)
            .updated_at(NOW)
            .with_method(MethodKind::Workshop, MethodStatus::Completed),
        Entity::new(EntityType::Persona, "p-1", "Sarah").updated_at(NOW),
        Entity::new(EntityType::Persona, "p-2", "Marcus").updated_at(NOW),
    ])
}

fn store() -> MemoryRelationshipStore {
    let mut store = MemoryRelationshipStore::new();
    store.create(NewRelationship::between(
        (EntityType::BrandAsset, "1", "Golden Circle Framework"),
        (EntityType::Persona, "p-1", "Sarah"),
        RelationType::Targets,
        Strength::Strong,
    ));
    store.create(NewRelationship::between(
        (EntityType::BrandAsset, "2", "Brand Vision"),
        (EntityType::BrandAsset, "1", "Golden Circle Framework"),
        RelationType::DerivesFrom,
        Strength::Strong,
    ));
    store.create(
        NewRelationship::between(
            (EntityType::Persona, "p-2", "Marcus"),
            (EntityType::BrandAsset, "2", "Brand Vision"),
            RelationType::ConflictsWith,
            Strength::Weak,
        )
        .with_status(RelationshipStatus::Conflict),
    );
    store
}

#[test]
fn test_suggestions_over_brand_graph() {
    let store = store();
    let registry = registry();
    let report = ConsistencyChecker::new(&store, &registry).check_at(NOW);
    assert_eq!(report.critical_count, 1);

    let suggestions = SuggestionEngine::new(&store, &registry).suggestions_at(&report, NOW);
    let ids: Vec<_> = suggestions.iter().map(|s| s.id.as_str()).collect();

    assert_eq!(ids[0], "fix-critical-issues");
    assert_eq!(suggestions[0].priority, Priority::Critical);
    for expected in [
        "suggest-brand-archetype",
        "link-personas-anchor",
        "diversify-research",
        "refresh-stale",
        "boost-critical-coverage",
    ] {
        assert!(ids.contains(&expected), "missing {}", expected);
    }
    assert!(!ids.contains(&"fix-warnings"));
    assert!(!ids.contains(&"suggest-first-persona"));

    let scores: Vec<u32> = suggestions.iter().map(|s| s.score()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_custom_thresholds() {
    let store = store();
    let registry = registry();
    let report = ConsistencyChecker::new(&store, &registry).check_at(NOW);
    let config = AdvisorConfig {
        low_coverage_threshold: 20,
        stale_after_days: 365,
        ..Default::default()
    };

    let suggestions = SuggestionEngine::new(&store, &registry)
        .with_config(config)
        .suggestions_at(&report, NOW);
    let ids: Vec<_> = suggestions.iter().map(|s| s.id.as_str()).collect();
    assert!(!ids.contains(&"boost-critical-coverage"));
    assert!(!ids.contains(&"refresh-stale"));
}

#[test]
fn test_dismissals_persist_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dismissals.db");
    let store = store();
    let registry = registry();
    let report = ConsistencyChecker::new(&store, &registry).check_at(NOW);

    {
        let mut dismissals = SqliteDismissalStore::new(&path).unwrap();
        dismiss(&mut dismissals, "refresh-stale").unwrap();
        dismiss(&mut dismissals, "fix-critical-issues").unwrap();
        dismiss(&mut dismissals, "no-such-suggestion").unwrap();
    }

    let dismissals = SqliteDismissalStore::new(&path).unwrap();
    let suggestions = SuggestionEngine::new(&store, &registry).suggestions_at(&report, NOW);
    let total = suggestions.len();
    let visible = filter_dismissed(suggestions, &dismissals).unwrap();
    let ids: Vec<_> = visible.iter().map(|s| s.id.as_str()).collect();

    assert_eq!(visible.len(), total - 1);
    assert!(!ids.contains(&"refresh-stale"));
    assert_eq!(ids[0], "fix-critical-issues");
}
