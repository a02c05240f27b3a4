//! Brandgraph Domain Layer
//!
//! Core vocabulary of the relationship graph and decision engine. It
//! defines the entities supplied by collaborators, the typed edges
//! between them, and the trait boundaries every other crate builds on.
//!
//! ## Key Concepts
//!
//! - **Entity**: an externally owned record (brand asset, persona, ...) the engine never mutates
//! - **Relationship**: a typed, directed, strength-weighted edge between two entities
//! - **Strength**: qualitative edge weight used in risk scoring
//! - **Coverage**: 0-100 measure of validated research behind an entity
//! - **Anchor rules**: which subtypes play the foundational roles in rule scans
//!
//! ## Architecture
//!
//! - Pure data and lookups only
//! - Storage implementations live in `brandgraph-store`
//! - Analysis lives in the impact, auditor, advisor and gatekeeper crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod anchors;
pub mod clock;
pub mod entity;
pub mod registry;
pub mod relationship;
pub mod traits;

// Re-exports for convenience
pub use anchors::{AnchorRules, Succession};
pub use clock::current_timestamp;
pub use entity::{
    Entity, EntityId, EntityKey, EntityStatus, EntityType, MethodKind, MethodStatus,
    ResearchMethod, UNKNOWN_ENTITY,
};
pub use registry::EntityRegistry;
pub use relationship::{
    EntityReference, NewRelationship, RelationType, Relationship, RelationshipId,
    RelationshipMetadata, RelationshipPatch, RelationshipStatus, Strength,
};
pub use traits::{DismissalStore, RelationshipStore};
