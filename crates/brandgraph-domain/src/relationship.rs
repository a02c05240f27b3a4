//! Relationship module - typed, directed, strength-weighted edges
//!
//! Direction is kept for metadata, but traversal treats every edge as
//! undirected: "the other entity" is whichever side is not the query.

use crate::entity::{EntityId, EntityKey, EntityType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a relationship
///
/// Generated ids have the form `rel-<uuid v7>`, which keeps them unique
/// and chronologically sortable. Seeded relationships may carry any id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipId(String);

impl RelationshipId {
    /// Generate a fresh UUIDv7-based id
    ///
    /// # Examples
    ///
    /// ```
    /// use brandgraph_domain::RelationshipId;
    ///
    /// let id = RelationshipId::generate();
    /// assert!(id.as_str().starts_with("rel-"));
    /// ```
    pub fn generate() -> Self {
        Self(format!("rel-{}", uuid::Uuid::now_v7()))
    }

    /// Wrap an existing id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RelationshipId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Type of relationship between entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationType {
    /// Source feeds information into target
    Informs,
    /// Source validates target
    Validates,
    /// Source shapes target
    Influences,
    /// Source uses target
    Uses,
    /// Source targets (e.g. a persona)
    Targets,
    /// Source mentions target
    References,
    /// Source was derived from target
    DerivesFrom,
    /// Source contradicts target
    ConflictsWith,
    /// Source supports target
    Supports,
}

impl RelationType {
    /// Every relation type
    pub const ALL: [RelationType; 9] = [
        RelationType::Informs,
        RelationType::Validates,
        RelationType::Influences,
        RelationType::Uses,
        RelationType::Targets,
        RelationType::References,
        RelationType::DerivesFrom,
        RelationType::ConflictsWith,
        RelationType::Supports,
    ];

    /// Get the relation name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Informs => "informs",
            RelationType::Validates => "validates",
            RelationType::Influences => "influences",
            RelationType::Uses => "uses",
            RelationType::Targets => "targets",
            RelationType::References => "references",
            RelationType::DerivesFrom => "derives-from",
            RelationType::ConflictsWith => "conflicts-with",
            RelationType::Supports => "supports",
        }
    }

    /// Parse a relation type from a string
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.to_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|t| t.as_str() == normalized)
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid relation type: {}", s))
    }
}

/// Qualitative edge weight used in risk scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strength {
    /// Loose association
    Weak,
    /// Regular dependency
    #[default]
    Medium,
    /// Hard dependency
    Strong,
}

impl Strength {
    /// Get the strength name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Weak => "weak",
            Strength::Medium => "medium",
            Strength::Strong => "strong",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Strength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weak" => Ok(Strength::Weak),
            "medium" => Ok(Strength::Medium),
            "strong" => Ok(Strength::Strong),
            _ => Err(format!("Invalid strength: {}", s)),
        }
    }
}

/// Lifecycle status of a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipStatus {
    /// In force
    #[default]
    Active,
    /// Suggested, not confirmed
    Proposed,
    /// The two sides disagree
    Conflict,
    /// Kept for history only
    Archived,
}

impl RelationshipStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipStatus::Active => "active",
            RelationshipStatus::Proposed => "proposed",
            RelationshipStatus::Conflict => "conflict",
            RelationshipStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for RelationshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-form annotations on a relationship
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RelationshipMetadata {
    /// Human notes (used as the conflict description)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Whether the edge was proposed by automation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_generated: Option<bool>,

    /// Confidence of an automated proposal, 0.0-1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// A typed edge between two entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Unique id within the store
    pub id: RelationshipId,

    /// Source entity type
    pub source_type: EntityType,
    /// Source entity id
    pub source_id: EntityId,
    /// Source display name (denormalized)
    pub source_name: String,

    /// Target entity type
    pub target_type: EntityType,
    /// Target entity id
    pub target_id: EntityId,
    /// Target display name (denormalized)
    pub target_name: String,

    /// Kind of association
    pub relation_type: RelationType,

    /// Edge weight
    pub strength: Strength,

    /// Lifecycle status
    #[serde(default)]
    pub status: RelationshipStatus,

    /// Annotations
    #[serde(default)]
    pub metadata: RelationshipMetadata,

    /// Creation time (seconds since Unix epoch)
    pub created_at: u64,

    /// Last merge time, if ever updated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<u64>,
}

impl Relationship {
    /// Key of the source entity
    pub fn source_key(&self) -> EntityKey {
        EntityKey::new(self.source_type, self.source_id.clone())
    }

    /// Key of the target entity
    pub fn target_key(&self) -> EntityKey {
        EntityKey::new(self.target_type, self.target_id.clone())
    }

    /// Whether `entity_type`/`id` is the source side
    pub fn is_source(&self, entity_type: EntityType, id: &EntityId) -> bool {
        self.source_type == entity_type && &self.source_id == id
    }

    /// Whether `entity_type`/`id` is the target side
    pub fn is_target(&self, entity_type: EntityType, id: &EntityId) -> bool {
        self.target_type == entity_type && &self.target_id == id
    }

    /// Whether the edge touches the entity on either side
    pub fn touches(&self, entity_type: EntityType, id: &EntityId) -> bool {
        self.is_source(entity_type, id) || self.is_target(entity_type, id)
    }

    /// Whether the edge touches the entity id on either side, ignoring type
    pub fn touches_id(&self, id: &EntityId) -> bool {
        &self.source_id == id || &self.target_id == id
    }

    /// The side that is not the queried entity
    ///
    /// Returns `None` if the edge does not touch the entity. For a
    /// self-loop the entity itself is returned.
    pub fn other_side(&self, entity_type: EntityType, id: &EntityId) -> Option<EntityReference> {
        if self.is_source(entity_type, id) {
            Some(self.target_reference())
        } else if self.is_target(entity_type, id) {
            Some(self.source_reference())
        } else {
            None
        }
    }

    /// Reference to the source side, tagged with this edge
    pub fn source_reference(&self) -> EntityReference {
        EntityReference {
            id: self.source_id.clone(),
            entity_type: self.source_type,
            name: self.source_name.clone(),
            relation_type: self.relation_type,
            strength: self.strength,
            last_updated: None,
        }
    }

    /// Reference to the target side, tagged with this edge
    pub fn target_reference(&self) -> EntityReference {
        EntityReference {
            id: self.target_id.clone(),
            entity_type: self.target_type,
            name: self.target_name.clone(),
            relation_type: self.relation_type,
            strength: self.strength,
            last_updated: None,
        }
    }

    /// Whether automation proposed this edge
    pub fn is_auto_generated(&self) -> bool {
        self.metadata.auto_generated.unwrap_or(false)
    }

    /// Apply a whole-field merge, stamping `updated_at`
    pub fn apply(&mut self, patch: RelationshipPatch, now: u64) {
        let RelationshipPatch {
            source_type,
            source_id,
            source_name,
            target_type,
            target_id,
            target_name,
            relation_type,
            strength,
            status,
            metadata,
        } = patch;

        if let Some(v) = source_type {
            self.source_type = v;
        }
        if let Some(v) = source_id {
            self.source_id = v;
        }
        if let Some(v) = source_name {
            self.source_name = v;
        }
        if let Some(v) = target_type {
            self.target_type = v;
        }
        if let Some(v) = target_id {
            self.target_id = v;
        }
        if let Some(v) = target_name {
            self.target_name = v;
        }
        if let Some(v) = relation_type {
            self.relation_type = v;
        }
        if let Some(v) = strength {
            self.strength = v;
        }
        if let Some(v) = status {
            self.status = v;
        }
        if let Some(v) = metadata {
            self.metadata = v;
        }
        self.updated_at = Some(now);
    }
}

/// Everything needed to create a relationship
///
/// The store assigns the id and `created_at`; a missing status defaults
/// to [`RelationshipStatus::Active`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRelationship {
    /// Source entity type
    pub source_type: EntityType,
    /// Source entity id
    pub source_id: EntityId,
    /// Source display name
    pub source_name: String,
    /// Target entity type
    pub target_type: EntityType,
    /// Target entity id
    pub target_id: EntityId,
    /// Target display name
    pub target_name: String,
    /// Kind of association
    pub relation_type: RelationType,
    /// Edge weight
    #[serde(default)]
    pub strength: Strength,
    /// Initial status (defaults to active)
    #[serde(default)]
    pub status: Option<RelationshipStatus>,
    /// Annotations
    #[serde(default)]
    pub metadata: RelationshipMetadata,
}

impl NewRelationship {
    /// Build a relationship between two entities
    pub fn between(
        source: (EntityType, &str, &str),
        target: (EntityType, &str, &str),
        relation_type: RelationType,
        strength: Strength,
    ) -> Self {
        Self {
            source_type: source.0,
            source_id: EntityId::new(source.1),
            source_name: source.2.to_string(),
            target_type: target.0,
            target_id: EntityId::new(target.1),
            target_name: target.2.to_string(),
            relation_type,
            strength,
            status: None,
            metadata: RelationshipMetadata::default(),
        }
    }

    /// Set an explicit status
    pub fn with_status(mut self, status: RelationshipStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.metadata.notes = Some(notes.into());
        self
    }

    /// Mark as proposed by automation
    pub fn auto_generated(mut self, confidence: f64) -> Self {
        self.metadata.auto_generated = Some(true);
        self.metadata.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }

    /// Materialize with a generated id and creation time
    pub fn into_relationship(self, id: RelationshipId, created_at: u64) -> Relationship {
        Relationship {
            id,
            source_type: self.source_type,
            source_id: self.source_id,
            source_name: self.source_name,
            target_type: self.target_type,
            target_id: self.target_id,
            target_name: self.target_name,
            relation_type: self.relation_type,
            strength: self.strength,
            status: self.status.unwrap_or_default(),
            metadata: self.metadata,
            created_at,
            updated_at: None,
        }
    }
}

/// Partial update: every `Some` field replaces the stored value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RelationshipPatch {
    /// New source type
    pub source_type: Option<EntityType>,
    /// New source id
    pub source_id: Option<EntityId>,
    /// New source name
    pub source_name: Option<String>,
    /// New target type
    pub target_type: Option<EntityType>,
    /// New target id
    pub target_id: Option<EntityId>,
    /// New target name
    pub target_name: Option<String>,
    /// New relation type
    pub relation_type: Option<RelationType>,
    /// New strength
    pub strength: Option<Strength>,
    /// New status
    pub status: Option<RelationshipStatus>,
    /// Replacement metadata
    pub metadata: Option<RelationshipMetadata>,
}

/// A pointer to an entity as seen through one relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityReference {
    /// Entity id
    pub id: EntityId,
    /// Entity type
    pub entity_type: EntityType,
    /// Display name
    pub name: String,
    /// Relation through which the entity was reached
    pub relation_type: RelationType,
    /// Strength of that relation
    pub strength: Strength,
    /// Last update of the entity, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<u64>,
}

impl EntityReference {
    /// Reference an entity directly (not through an edge)
    pub fn to_entity(
        entity: &crate::Entity,
        relation_type: RelationType,
        strength: Strength,
    ) -> Self {
        Self {
            id: entity.id.clone(),
            entity_type: entity.entity_type,
            name: entity.name.clone(),
            relation_type,
            strength,
            last_updated: None,
        }
    }

    /// Attach the entity's last update time
    pub fn with_last_updated(mut self, timestamp: u64) -> Self {
        self.last_updated = Some(timestamp);
        self
    }

    /// Fully qualified key
    pub fn key(&self) -> EntityKey {
        EntityKey::new(self.entity_type, self.id.clone())
    }
}
