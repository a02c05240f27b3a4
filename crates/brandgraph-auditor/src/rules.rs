//! The independent rule scans
//!
//! Each scan reads the same [`ScanContext`] and contributes zero or more
//! issues. Scans never see each other's output, so their order does not
//! matter.

use crate::report::{ConsistencyIssue, IssueKind, Severity};
use crate::AuditConfig;
use brandgraph_domain::clock::days_before;
use brandgraph_domain::{
    AnchorRules, Entity, EntityKey, EntityReference, EntityRegistry, RelationType, Relationship,
    RelationshipStatus, Strength,
};
use std::collections::HashSet;

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "be", "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should", "may", "might", "must", "can", "that", "this", "these",
    "those",
];

/// Everything a scan may read
pub struct ScanContext<'a> {
    /// Relationship snapshot
    pub relationships: &'a [Relationship],
    /// Entity registries
    pub registry: &'a EntityRegistry,
    /// Thresholds
    pub config: &'a AuditConfig,
    /// Anchor roles
    pub anchors: &'a AnchorRules,
    /// Check time
    pub now: u64,
}

impl ScanContext<'_> {
    fn edges_of<'s>(&'s self, entity: &'s Entity) -> impl Iterator<Item = &'s Relationship> {
        let relationships: &'s [Relationship] = self.relationships;
        relationships
            .iter()
            .filter(move |r| r.touches(entity.entity_type, &entity.id))
    }
}

/// A named rule scan
pub type Rule = fn(&ScanContext<'_>) -> Vec<ConsistencyIssue>;

/// Every scan run by a consistency check
pub const RULES: [(&str, Rule); 5] = [
    ("semantic-conflicts", semantic_conflicts as Rule),
    ("missing-connections", missing_connections as Rule),
    ("stale-references", stale_references as Rule),
    ("keyword-gaps", keyword_gaps as Rule),
    ("orphaned-entities", orphaned_entities as Rule),
];

/// One critical issue per relationship in `conflict` status
pub fn semantic_conflicts(ctx: &ScanContext<'_>) -> Vec<ConsistencyIssue> {
    ctx.relationships
        .iter()
        .filter(|r| r.status == RelationshipStatus::Conflict)
        .map(|conflict| ConsistencyIssue {
            id: format!("conflict-{}", conflict.id),
            severity: Severity::Critical,
            kind: IssueKind::SemanticConflict,
            title: format!(
                "Conflict: {} \u{2194} {}",
                conflict.source_name, conflict.target_name
            ),
            description: conflict
                .metadata
                .notes
                .clone()
                .unwrap_or_else(|| "Semantic conflict detected between entities".to_string()),
            affected_entities: vec![conflict.source_reference(), conflict.target_reference()],
            suggested_action: "Review both entities and resolve conflicting information"
                .to_string(),
            auto_fixable: false,
            priority: 10,
            detected_at: conflict.created_at,
        })
        .collect()
}

/// One aggregate warning listing critical entities not linked to the anchor
pub fn missing_connections(ctx: &ScanContext<'_>) -> Vec<ConsistencyIssue> {
    let Some(anchor) = ctx.anchors.anchor(ctx.registry) else {
        return Vec::new();
    };

    let connected: HashSet<EntityKey> = ctx
        .edges_of(anchor)
        .filter_map(|r| r.other_side(anchor.entity_type, &anchor.id))
        .map(|other| other.key())
        .collect();

    let anchor_key = anchor.key();
    let missing: Vec<EntityReference> = ctx
        .registry
        .iter()
        .filter(|e| e.is_critical && e.key() != anchor_key)
        .filter(|e| !connected.contains(&e.key()))
        .map(|e| EntityReference::to_entity(e, RelationType::Supports, Strength::Strong))
        .collect();

    if missing.is_empty() {
        return Vec::new();
    }

    vec![ConsistencyIssue {
        id: "missing-anchor-connections".to_string(),
        severity: Severity::Warning,
        kind: IssueKind::MissingConnection,
        title: format!("{} not connected to all critical entities", anchor.name),
        description: format!(
            "{} critical entities are not connected to {}",
            missing.len(),
            anchor.name
        ),
        affected_entities: missing,
        suggested_action: format!(
            "Review and create relationships between {} and critical entities",
            anchor.name
        ),
        auto_fixable: true,
        priority: 7,
        detected_at: ctx.now,
    }]
}

/// One info issue per connected entity not updated within the window
pub fn stale_references(ctx: &ScanContext<'_>) -> Vec<ConsistencyIssue> {
    let cutoff = days_before(ctx.now, ctx.config.stale_after_days);

    ctx.registry
        .iter()
        .filter(|e| e.last_updated_at < cutoff)
        .filter_map(|entity| {
            let count = ctx.edges_of(entity).count();
            if count == 0 {
                return None;
            }
            Some(ConsistencyIssue {
                id: format!("stale-{}-{}", entity.entity_type, entity.id),
                severity: Severity::Info,
                kind: IssueKind::StaleReference,
                title: format!(
                    "{} hasn't been updated in {}+ days",
                    entity.name, ctx.config.stale_after_days
                ),
                description: format!(
                    "This entity has {} relationships but hasn't been reviewed recently",
                    count
                ),
                affected_entities: vec![EntityReference::to_entity(
                    entity,
                    RelationType::References,
                    Strength::Medium,
                )
                .with_last_updated(entity.last_updated_at)],
                suggested_action:
                    "Review and refresh this entity to ensure information is current".to_string(),
                auto_fixable: false,
                priority: 3,
                detected_at: ctx.now,
            })
        })
        .collect()
}

/// One warning when the anchor's keywords are missing from its partner
pub fn keyword_gaps(ctx: &ScanContext<'_>) -> Vec<ConsistencyIssue> {
    let (Some(anchor), Some(partner)) = (
        ctx.anchors.anchor(ctx.registry),
        ctx.anchors.keyword_partner(ctx.registry),
    ) else {
        return Vec::new();
    };

    let extract = |entity: &Entity| {
        extract_keywords(
            entity.content.as_deref().unwrap_or_default(),
            ctx.config.min_keyword_len,
            ctx.config.max_keywords,
        )
    };
    let anchor_keywords = extract(anchor);
    let partner_keywords = extract(partner);

    let missing: Vec<&str> = anchor_keywords
        .iter()
        .filter(|kw| !partner_keywords.contains(kw))
        .map(String::as_str)
        .collect();

    if missing.len() <= ctx.config.keyword_gap_threshold {
        return Vec::new();
    }

    let shown: Vec<&str> = missing.iter().take(3).copied().collect();
    let reference = |e: &Entity| EntityReference::to_entity(e, RelationType::Supports, Strength::Strong);

    vec![ConsistencyIssue {
        id: "keyword-gap".to_string(),
        severity: Severity::Warning,
        kind: IssueKind::KeywordGap,
        title: format!("Key concepts from {} missing in {}", anchor.name, partner.name),
        description: format!(
            "Keywords \"{}\" from {} are not reflected in {}",
            shown.join(", "),
            anchor.name,
            partner.name
        ),
        affected_entities: vec![reference(anchor), reference(partner)],
        suggested_action: format!(
            "Review {} to ensure alignment with {} core concepts",
            partner.name, anchor.name
        ),
        auto_fixable: false,
        priority: 6,
        detected_at: ctx.now,
    }]
}

/// One info issue per entity with no relationships
pub fn orphaned_entities(ctx: &ScanContext<'_>) -> Vec<ConsistencyIssue> {
    ctx.registry
        .iter()
        .filter(|e| ctx.edges_of(e).next().is_none())
        .map(|entity| ConsistencyIssue {
            id: format!("orphan-{}-{}", entity.entity_type, entity.id),
            severity: Severity::Info,
            kind: IssueKind::OrphanedEntity,
            title: format!("{} has no relationships", entity.name),
            description: "This entity is isolated and not connected to other entities"
                .to_string(),
            affected_entities: vec![EntityReference::to_entity(
                entity,
                RelationType::References,
                Strength::Weak,
            )],
            suggested_action:
                "Create relationships with relevant personas, research plans, or other brand assets"
                    .to_string(),
            auto_fixable: false,
            priority: 4,
            detected_at: ctx.now,
        })
        .collect()
}

/// Naive lexical keywords: lowercase words of at least `min_len`
/// characters that are not stopwords, first `max` in text order
///
/// # Examples
///
/// ```
/// use brandgraph_auditor::extract_keywords;
///
/// let keywords = extract_keywords("We believe that creators should thrive", 5, 10);
/// assert_eq!(keywords, vec!["believe", "creators", "thrive"]);
/// ```
pub fn extract_keywords(text: &str, min_len: usize, max: usize) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|word| word.chars().count() >= min_len && !STOPWORDS.contains(word))
        .take(max)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandgraph_domain::{EntityType, NewRelationship, RelationshipId};

    const NOW: u64 = 1_750_000_000;

    fn context<'a>(
        relationships: &'a [Relationship],
        registry: &'a EntityRegistry,
        config: &'a AuditConfig,
        anchors: &'a AnchorRules,
    ) -> ScanContext<'a> {
        ScanContext {
            relationships,
            registry,
            config,
            anchors,
            now: NOW,
        }
    }

    fn link(id: &str, source: (EntityType, &str), target: (EntityType, &str)) -> Relationship {
        NewRelationship::between(
            (source.0, source.1, source.1),
            (target.0, target.1, target.1),
            RelationType::Supports,
            Strength::Medium,
        )
        .into_relationship(RelationshipId::new(id), NOW)
    }

    #[test]
    fn test_extract_keywords_filters_short_and_stopwords() {
        let keywords = extract_keywords("Those COMPANIES could empower, innovate & grow!", 5, 10);
        assert_eq!(keywords, vec!["companies", "empower", "innovate"]);
    }

    #[test]
    fn test_extract_keywords_caps_count() {
        let text = "alpha1 alpha2 alpha3 alpha4 alpha5";
        assert_eq!(extract_keywords(text, 5, 2), vec!["alpha1", "alpha2"]);
    }

    #[test]
    fn test_conflict_uses_notes_as_description() {
        let mut rel = link("rel-1", (EntityType::BrandAsset, "1"), (EntityType::Persona, "p"));
        rel.status = RelationshipStatus::Conflict;
        rel.metadata.notes = Some("Tone mismatch".to_string());
        let relationships = vec![rel];
        let (registry, config, anchors) =
            (EntityRegistry::default(), AuditConfig::default(), AnchorRules::default());

        let issues = semantic_conflicts(&context(&relationships, &registry, &config, &anchors));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "conflict-rel-1");
        assert_eq!(issues[0].description, "Tone mismatch");
        assert_eq!(issues[0].priority, 10);
        assert_eq!(issues[0].affected_entities.len(), 2);
    }

    #[test]
    fn test_missing_connections_aggregates() {
        let registry = EntityRegistry::new(vec![
            Entity::new(EntityType::BrandAsset, "1", "Golden Circle Framework")
                .with_kind("Golden Circle")
                .critical(),
            Entity::new(EntityType::BrandAsset, "2", "Mission").critical(),
            Entity::new(EntityType::BrandAsset, "3", "Values").critical(),
            Entity::new(EntityType::Persona, "2", "Persona two").critical(),
            Entity::new(EntityType::BrandAsset, "4", "Tagline"),
        ]);
        // links asset 2 only; persona 2 shares the id but is still missing
        let relationships = vec![link(
            "rel-1",
            (EntityType::BrandAsset, "2"),
            (EntityType::BrandAsset, "1"),
        )];
        let (config, anchors) = (AuditConfig::default(), AnchorRules::default());

        let issues = missing_connections(&context(&relationships, &registry, &config, &anchors));
        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert!(issue.auto_fixable);
        assert_eq!(issue.priority, 7);
        let names: Vec<_> = issue.affected_entities.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Values", "Persona two"]);
    }

    #[test]
    fn test_missing_connections_without_anchor() {
        let registry =
            EntityRegistry::new(vec![Entity::new(EntityType::BrandAsset, "2", "Mission").critical()]);
        let (config, anchors) = (AuditConfig::default(), AnchorRules::default());
        assert!(missing_connections(&context(&[], &registry, &config, &anchors)).is_empty());
    }

    #[test]
    fn test_stale_requires_relationships() {
        let old = NOW - 200 * 86_400;
        let registry = EntityRegistry::new(vec![
            Entity::new(EntityType::BrandAsset, "1", "Old and linked").updated_at(old),
            Entity::new(EntityType::BrandAsset, "2", "Old and alone").updated_at(old),
            Entity::new(EntityType::Persona, "p", "Fresh").updated_at(NOW),
        ]);
        let relationships = vec![link("rel-1", (EntityType::BrandAsset, "1"), (EntityType::Persona, "p"))];
        let (config, anchors) = (AuditConfig::default(), AnchorRules::default());

        let issues = stale_references(&context(&relationships, &registry, &config, &anchors));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "stale-brand-asset-1");
        assert_eq!(issues[0].affected_entities[0].last_updated, Some(old));
    }

    #[test]
    fn test_keyword_gap_threshold() {
        let registry = EntityRegistry::new(vec![
            Entity::new(EntityType::BrandAsset, "1", "Golden Circle Framework")
                .with_kind("Golden Circle")
                .with_content("We empower creators through sustainable innovation and community"),
            Entity::new(EntityType::BrandAsset, "2", "Brand Vision")
                .with_kind("Vision Statement")
                .with_content("A world where creators thrive"),
        ]);
        let (config, anchors) = (AuditConfig::default(), AnchorRules::default());

        let issues = keyword_gaps(&context(&[], &registry, &config, &anchors));
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].description,
            "Keywords \"empower, through, sustainable\" from Golden Circle Framework are not reflected in Brand Vision"
        );

        let lenient = AuditConfig {
            keyword_gap_threshold: 5,
            ..Default::default()
        };
        assert!(keyword_gaps(&context(&[], &registry, &lenient, &anchors)).is_empty());
    }

    #[test]
    fn test_orphans_are_type_scoped() {
        let registry = EntityRegistry::new(vec![
            Entity::new(EntityType::BrandAsset, "1", "Linked"),
            Entity::new(EntityType::Persona, "1", "Same id, unlinked"),
        ]);
        let relationships = vec![link("rel-1", (EntityType::BrandAsset, "1"), (EntityType::Trend, "t"))];
        let (config, anchors) = (AuditConfig::default(), AnchorRules::default());

        let issues = orphaned_entities(&context(&relationships, &registry, &config, &anchors));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "orphan-persona-1");
    }
}
