//! Shared relationship store for concurrent callers

use crate::MemoryRelationshipStore;
use brandgraph_domain::{
    EntityId, EntityType, NewRelationship, Relationship, RelationshipId, RelationshipPatch,
    RelationshipStore,
};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable handle over a single relationship collection
///
/// Every mutation goes through one write lock, so CRUD is serialized.
/// Analysis should run against [`SharedRelationshipStore::snapshot`],
/// an owned copy that needs no further locking.
#[derive(Debug, Clone, Default)]
pub struct SharedRelationshipStore {
    inner: Arc<RwLock<MemoryRelationshipStore>>,
}

impl SharedRelationshipStore {
    /// Wrap an existing store
    pub fn new(store: MemoryRelationshipStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Point-in-time copy for lock-free reads
    pub fn snapshot(&self) -> MemoryRelationshipStore {
        self.read().clone()
    }

    // A panic while holding the lock cannot leave the Vec half-written,
    // so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, MemoryRelationshipStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryRelationshipStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RelationshipStore for SharedRelationshipStore {
    fn all(&self) -> Vec<Relationship> {
        self.read().all()
    }

    fn get(&self, id: &RelationshipId) -> Option<Relationship> {
        self.read().get(id)
    }

    fn for_entity(&self, entity_type: EntityType, id: &EntityId) -> Vec<Relationship> {
        self.read().for_entity(entity_type, id)
    }

    fn create(&mut self, relationship: NewRelationship) -> Relationship {
        self.write().create(relationship)
    }

    fn update(&mut self, id: &RelationshipId, patch: RelationshipPatch) -> Option<Relationship> {
        self.write().update(id, patch)
    }

    fn delete(&mut self, id: &RelationshipId) -> bool {
        self.write().delete(id)
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandgraph_domain::{RelationType, Strength};
    use std::thread;

    fn link(i: usize) -> NewRelationship {
        let target = format!("p-{}", i);
        NewRelationship::between(
            (EntityType::BrandAsset, "1", "Golden Circle"),
            (EntityType::Persona, &target, &target),
            RelationType::Targets,
            Strength::Weak,
        )
    }

    #[test]
    fn test_concurrent_creates_are_serialized() {
        let store = SharedRelationshipStore::default();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let mut handle = store.clone();
                thread::spawn(move || {
                    for j in 0..25 {
                        handle.create(link(i * 100 + j));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 200);
        let mut ids: Vec<_> = store.all().into_iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_writes() {
        let mut store = SharedRelationshipStore::default();
        store.create(link(1));
        let snapshot = store.snapshot();
        store.create(link(2));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 2);
    }
}
