//! Trait definitions for external interactions
//!
//! These traits define the boundaries between engine logic and storage.
//! Implementations live in `brandgraph-store`.

use crate::entity::{EntityId, EntityType};
use crate::relationship::{NewRelationship, Relationship, RelationshipId, RelationshipPatch};

/// Trait for storing and retrieving relationships
///
/// Absence is never an error: lookups return `Option`, `update` returns
/// `None` for an unknown id and `delete` returns `false`. Deleting a
/// relationship never cascades; callers re-query.
pub trait RelationshipStore {
    /// Every relationship, in insertion order
    fn all(&self) -> Vec<Relationship>;

    /// Get a relationship by id
    fn get(&self, id: &RelationshipId) -> Option<Relationship>;

    /// Every relationship where the entity is the source or the target
    fn for_entity(&self, entity_type: EntityType, id: &EntityId) -> Vec<Relationship>;

    /// Create a relationship with a generated id, `created_at = now`
    /// and status `active` unless one is given
    fn create(&mut self, relationship: NewRelationship) -> Relationship;

    /// Merge `patch` into an existing relationship, stamping `updated_at`
    fn update(&mut self, id: &RelationshipId, patch: RelationshipPatch) -> Option<Relationship>;

    /// Remove a relationship, returning whether it existed
    fn delete(&mut self, id: &RelationshipId) -> bool;

    /// Number of relationships
    fn len(&self) -> usize {
        self.all().len()
    }

    /// Whether the store holds no relationships
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Durable key-value boundary for dismissed suggestion ids
pub trait DismissalStore {
    /// Error type for store operations
    type Error;

    /// Record a dismissal (idempotent)
    fn dismiss(&mut self, suggestion_id: &str) -> Result<(), Self::Error>;

    /// Whether a suggestion has been dismissed
    fn is_dismissed(&self, suggestion_id: &str) -> Result<bool, Self::Error>;

    /// Every dismissed suggestion id
    fn dismissed(&self) -> Result<Vec<String>, Self::Error>;
}
