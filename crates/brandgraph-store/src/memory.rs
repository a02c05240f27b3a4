//! In-memory relationship store

use crate::StoreError;
use brandgraph_domain::clock::current_timestamp;
use brandgraph_domain::{
    EntityId, EntityType, NewRelationship, Relationship, RelationshipId, RelationshipPatch,
    RelationshipStore,
};

/// Vector-backed implementation of [`RelationshipStore`]
///
/// The store is an explicit repository object owned by the caller. Every
/// lookup is a linear scan, which keeps insertion order stable for the
/// analyzers. Duplicate (source, target, relation type) triples are
/// permitted.
///
/// # Examples
///
/// ```
/// use brandgraph_domain::{EntityType, NewRelationship, RelationType, RelationshipStore, Strength};
/// use brandgraph_store::MemoryRelationshipStore;
///
/// let mut store = MemoryRelationshipStore::new();
/// let rel = store.create(NewRelationship::between(
///     (EntityType::BrandAsset, "1", "Golden Circle"),
///     (EntityType::Persona, "p-1", "Sarah"),
///     RelationType::Targets,
///     Strength::Strong,
/// ));
/// assert_eq!(store.get(&rel.id), Some(rel));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryRelationshipStore {
    relationships: Vec<Relationship>,
    clock: fn() -> u64,
}

impl Default for MemoryRelationshipStore {
    fn default() -> Self {
        Self {
            relationships: Vec::new(),
            clock: current_timestamp,
        }
    }
}

impl MemoryRelationshipStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from existing relationships
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if two relationships share an id.
    pub fn from_relationships(relationships: Vec<Relationship>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for relationship in relationships {
            store.insert(relationship)?;
        }
        Ok(store)
    }

    /// Replace the clock used to stamp `created_at`/`updated_at`
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    /// Insert a fully formed relationship, keeping its id and timestamps
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if the id is already taken.
    pub fn insert(&mut self, relationship: Relationship) -> Result<(), StoreError> {
        if self.position(&relationship.id).is_some() {
            return Err(StoreError::DuplicateId(relationship.id.to_string()));
        }
        self.relationships.push(relationship);
        Ok(())
    }

    /// Borrow every relationship without cloning
    pub fn as_slice(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Consume the store, returning its relationships
    pub fn into_relationships(self) -> Vec<Relationship> {
        self.relationships
    }

    fn position(&self, id: &RelationshipId) -> Option<usize> {
        self.relationships.iter().position(|r| &r.id == id)
    }

    fn fresh_id(&self) -> RelationshipId {
        // UUIDv7 collisions are not expected; the loop keeps the
        // uniqueness invariant even against seeded ids.
        loop {
            let id = RelationshipId::generate();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }
}

impl RelationshipStore for MemoryRelationshipStore {
    fn all(&self) -> Vec<Relationship> {
        self.relationships.clone()
    }

    fn get(&self, id: &RelationshipId) -> Option<Relationship> {
        self.relationships.iter().find(|r| &r.id == id).cloned()
    }

    fn for_entity(&self, entity_type: EntityType, id: &EntityId) -> Vec<Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.touches(entity_type, id))
            .cloned()
            .collect()
    }

    fn create(&mut self, relationship: NewRelationship) -> Relationship {
        let id = self.fresh_id();
        let created = relationship.into_relationship(id, (self.clock)());
        tracing::debug!(
            id = %created.id,
            relation = %created.relation_type,
            "Relationship created: {} -> {}",
            created.source_key(),
            created.target_key()
        );
        self.relationships.push(created.clone());
        created
    }

    fn update(&mut self, id: &RelationshipId, patch: RelationshipPatch) -> Option<Relationship> {
        let now = (self.clock)();
        let index = self.position(id)?;
        let relationship = &mut self.relationships[index];
        relationship.apply(patch, now);
        tracing::debug!(id = %id, "Relationship updated");
        Some(relationship.clone())
    }

    fn delete(&mut self, id: &RelationshipId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.relationships.remove(index);
                tracing::debug!(id = %id, "Relationship deleted");
                true
            }
            None => false,
        }
    }

    fn len(&self) -> usize {
        self.relationships.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandgraph_domain::{RelationType, RelationshipStatus, Strength};

    fn fixed_clock() -> u64 {
        1_700_000_000
    }

    fn link(source: &str, target: &str) -> NewRelationship {
        NewRelationship::between(
            (EntityType::BrandAsset, source, source),
            (EntityType::Persona, target, target),
            RelationType::Targets,
            Strength::Medium,
        )
    }

    #[test]
    fn test_create_assigns_id_and_timestamp() {
        let mut store = MemoryRelationshipStore::new().with_clock(fixed_clock);
        let rel = store.create(link("1", "p-1"));

        assert!(rel.id.as_str().starts_with("rel-"));
        assert_eq!(rel.created_at, 1_700_000_000);
        assert_eq!(rel.status, RelationshipStatus::Active);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_keeps_explicit_status() {
        let mut store = MemoryRelationshipStore::new();
        let rel = store.create(link("1", "p-1").with_status(RelationshipStatus::Proposed));
        assert_eq!(rel.status, RelationshipStatus::Proposed);
    }

    #[test]
    fn test_duplicate_triples_are_permitted() {
        let mut store = MemoryRelationshipStore::new();
        let a = store.create(link("1", "p-1"));
        let b = store.create(link("1", "p-1"));
        assert_ne!(a.id, b.id);
        assert_eq!(store.for_entity(EntityType::BrandAsset, &"1".into()).len(), 2);
    }

    #[test]
    fn test_update_missing_returns_none() {
        let mut store = MemoryRelationshipStore::new();
        assert!(store
            .update(&RelationshipId::new("nope"), RelationshipPatch::default())
            .is_none());
    }

    #[test]
    fn test_update_stamps_updated_at() {
        let mut store = MemoryRelationshipStore::new().with_clock(fixed_clock);
        let rel = store.create(link("1", "p-1"));
        let updated = store
            .update(
                &rel.id,
                RelationshipPatch {
                    strength: Some(Strength::Strong),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.strength, Strength::Strong);
        assert_eq!(updated.updated_at, Some(1_700_000_000));
        assert_eq!(updated.created_at, rel.created_at);
        assert_eq!(store.get(&rel.id), Some(updated));
    }

    #[test]
    fn test_delete_does_not_cascade() {
        let mut store = MemoryRelationshipStore::new();
        let a = store.create(link("1", "p-1"));
        let b = store.create(link("1", "p-2"));

        assert!(store.delete(&a.id));
        assert!(!store.delete(&a.id));
        assert_eq!(store.all(), vec![b]);
    }

    #[test]
    fn test_seeding_rejects_duplicate_ids() {
        let rel = link("1", "p-1").into_relationship(RelationshipId::new("rel-1"), 1);
        let result = MemoryRelationshipStore::from_relationships(vec![rel.clone(), rel]);
        assert!(matches!(result, Err(StoreError::DuplicateId(id)) if id == "rel-1"));
    }
}
