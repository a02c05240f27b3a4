//! Aggregate statistics over the relationship store

use brandgraph_domain::{
    EntityKey, EntityReference, EntityRegistry, RelationType, Relationship, RelationshipStore,
    Strength,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// How many recently created relationships are reported
pub const RECENTLY_CREATED_LIMIT: usize = 5;

/// Relationship counts per strength
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StrengthCounts {
    /// Weak edges
    pub weak: usize,
    /// Medium edges
    pub medium: usize,
    /// Strong edges
    pub strong: usize,
}

impl StrengthCounts {
    fn add(&mut self, strength: Strength) {
        match strength {
            Strength::Weak => self.weak += 1,
            Strength::Medium => self.medium += 1,
            Strength::Strong => self.strong += 1,
        }
    }
}

/// An entity and the number of edge endpoints it occupies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionCount {
    /// Entity as first seen in the store
    pub entity: EntityReference,
    /// Number of relationships touching it
    pub connections: usize,
}

/// Snapshot statistics for the whole graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipStats {
    /// Number of relationships
    pub total_relationships: usize,
    /// Count per relation type, every type present
    pub by_type: BTreeMap<RelationType, usize>,
    /// Count per strength
    pub by_strength: StrengthCounts,
    /// Relationships per connected entity (0 when empty)
    pub average_connections: f64,
    /// Entity with the most edges
    pub most_connected: Option<ConnectionCount>,
    /// Entity with the fewest edges (among connected entities)
    pub least_connected: Option<ConnectionCount>,
    /// Registry entities without any edge
    pub orphaned_entities: Vec<EntityReference>,
    /// Newest relationships first
    pub recently_created: Vec<Relationship>,
    /// Edges proposed by automation
    pub auto_generated_count: usize,
    /// Edges created by people
    pub user_created_count: usize,
}

impl RelationshipStats {
    /// Compute statistics for `store`, resolving orphans against `registry`
    ///
    /// Ties for most/least connected go to the entity encountered first
    /// in store order.
    pub fn compute<S: RelationshipStore>(store: &S, registry: &EntityRegistry) -> Self {
        Self::from_relationships(&store.all(), registry)
    }

    /// Compute statistics over an already captured relationship set
    pub fn from_relationships(relationships: &[Relationship], registry: &EntityRegistry) -> Self {

        let mut by_type: BTreeMap<RelationType, usize> =
            RelationType::ALL.iter().map(|t| (*t, 0)).collect();
        let mut by_strength = StrengthCounts::default();
        for rel in relationships {
            *by_type.entry(rel.relation_type).or_insert(0) += 1;
            by_strength.add(rel.strength);
        }

        let counts = connection_counts(relationships);

        let mut most_connected: Option<&ConnectionCount> = None;
        let mut least_connected: Option<&ConnectionCount> = None;
        for count in &counts {
            if most_connected.map_or(true, |m| count.connections > m.connections) {
                most_connected = Some(count);
            }
            if least_connected.map_or(true, |l| count.connections < l.connections) {
                least_connected = Some(count);
            }
        }

        let average_connections = if counts.is_empty() {
            0.0
        } else {
            relationships.len() as f64 / counts.len() as f64
        };

        let connected: HashSet<EntityKey> = counts.iter().map(|c| c.entity.key()).collect();
        let orphaned_entities = registry
            .iter()
            .filter(|e| !connected.contains(&e.key()))
            .map(|e| EntityReference::to_entity(e, RelationType::References, Strength::Weak))
            .collect();

        let auto_generated_count = relationships
            .iter()
            .filter(|r| r.is_auto_generated())
            .count();

        let mut recently_created = relationships.to_vec();
        recently_created.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recently_created.truncate(RECENTLY_CREATED_LIMIT);

        Self {
            total_relationships: relationships.len(),
            by_type,
            by_strength,
            average_connections,
            most_connected: most_connected.cloned(),
            least_connected: least_connected.cloned(),
            orphaned_entities,
            recently_created,
            auto_generated_count,
            user_created_count: relationships.len() - auto_generated_count,
        }
    }
}

/// Per-entity edge counts in first-encounter order
fn connection_counts(relationships: &[Relationship]) -> Vec<ConnectionCount> {
    let mut index: HashMap<EntityKey, usize> = HashMap::new();
    let mut counts: Vec<ConnectionCount> = Vec::new();

    for rel in relationships {
        for side in [rel.source_reference(), rel.target_reference()] {
            match index.get(&side.key()) {
                Some(&i) => counts[i].connections += 1,
                None => {
                    index.insert(side.key(), counts.len());
                    counts.push(ConnectionCount {
                        entity: side,
                        connections: 1,
                    });
                }
            }
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandgraph_domain::{Entity, EntityType, NewRelationship, RelationshipId};
    use brandgraph_store::MemoryRelationshipStore;

    fn rel(id: &str, source: &str, target: &str, created_at: u64) -> Relationship {
        NewRelationship::between(
            (EntityType::BrandAsset, source, source),
            (EntityType::Persona, target, target),
            RelationType::Targets,
            Strength::Strong,
        )
        .into_relationship(RelationshipId::new(id), created_at)
    }

    #[test]
    fn test_empty_store() {
        let store = MemoryRelationshipStore::new();
        let registry =
            EntityRegistry::new(vec![Entity::new(EntityType::BrandAsset, "1", "Golden Circle")]);
        let stats = RelationshipStats::compute(&store, &registry);

        assert_eq!(stats.total_relationships, 0);
        assert_eq!(stats.by_type.len(), 9);
        assert!(stats.by_type.values().all(|c| *c == 0));
        assert_eq!(stats.average_connections, 0.0);
        assert!(stats.most_connected.is_none());
        assert!(stats.least_connected.is_none());
        assert_eq!(stats.orphaned_entities.len(), 1);
    }

    #[test]
    fn test_connection_extremes_and_average() {
        let store = MemoryRelationshipStore::from_relationships(vec![
            rel("rel-1", "1", "p-1", 10),
            rel("rel-2", "1", "p-2", 30),
            rel("rel-3", "2", "p-1", 20),
        ])
        .unwrap();
        let stats = RelationshipStats::compute(&store, &EntityRegistry::default());

        // 3 edges over 4 distinct entities
        assert_eq!(stats.average_connections, 0.75);
        let most = stats.most_connected.unwrap();
        assert_eq!(most.entity.id.as_str(), "1");
        assert_eq!(most.connections, 2);
        let least = stats.least_connected.unwrap();
        assert_eq!(least.entity.id.as_str(), "p-2");
        assert_eq!(least.connections, 1);
        assert_eq!(stats.by_strength.strong, 3);
        assert_eq!(stats.by_type[&RelationType::Targets], 3);
    }

    #[test]
    fn test_recently_created_is_newest_first() {
        let relationships = (0..7)
            .map(|i| rel(&format!("rel-{}", i), "1", &format!("p-{}", i), i))
            .collect();
        let store = MemoryRelationshipStore::from_relationships(relationships).unwrap();
        let stats = RelationshipStats::compute(&store, &EntityRegistry::default());

        let ids: Vec<_> = stats
            .recently_created
            .iter()
            .map(|r| r.id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["rel-6", "rel-5", "rel-4", "rel-3", "rel-2"]);
    }

    #[test]
    fn test_auto_generated_split() {
        let mut store = MemoryRelationshipStore::new();
        store.create(
            NewRelationship::between(
                (EntityType::Trend, "t-1", "Sustainability"),
                (EntityType::BrandAsset, "1", "Golden Circle"),
                RelationType::Influences,
                Strength::Weak,
            )
            .auto_generated(0.8),
        );
        store.create(NewRelationship::between(
            (EntityType::Persona, "p-1", "Sarah"),
            (EntityType::BrandAsset, "1", "Golden Circle"),
            RelationType::Uses,
            Strength::Medium,
        ));
        let registry = EntityRegistry::new(vec![
            Entity::new(EntityType::BrandAsset, "1", "Golden Circle"),
            Entity::new(EntityType::Persona, "1", "Unlinked persona"),
        ]);
        let stats = RelationshipStats::compute(&store, &registry);

        assert_eq!(stats.auto_generated_count, 1);
        assert_eq!(stats.user_created_count, 1);
        // persona "1" shares an id with the asset but is a different entity
        assert_eq!(stats.orphaned_entities.len(), 1);
        assert_eq!(stats.orphaned_entities[0].entity_type, EntityType::Persona);
    }
}
