//! Entity module - the externally owned records the engine reasons about
//!
//! Entities (brand assets, personas, research plans, ...) are supplied by
//! collaborators as read-only collections. The engine never mutates them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name used whenever an entity lookup misses
pub const UNKNOWN_ENTITY: &str = "Unknown Entity";

/// Identifier of an entity inside its own registry
///
/// Entity ids are owned by the collaborating registries, so they are
/// opaque strings rather than generated identifiers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap a raw registry id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The closed set of entity types tracked by the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    /// Brand asset (Golden Circle, Vision Statement, ...)
    BrandAsset,

    /// Target persona
    Persona,

    /// Research plan
    ResearchPlan,

    /// Strategy tool
    StrategyTool,

    /// Market trend
    Trend,

    /// Knowledge item
    Knowledge,

    /// Product or service
    Product,
}

impl EntityType {
    /// Every entity type, in registry order
    pub const ALL: [EntityType; 7] = [
        EntityType::BrandAsset,
        EntityType::Persona,
        EntityType::ResearchPlan,
        EntityType::StrategyTool,
        EntityType::Trend,
        EntityType::Knowledge,
        EntityType::Product,
    ];

    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::BrandAsset => "brand-asset",
            EntityType::Persona => "persona",
            EntityType::ResearchPlan => "research-plan",
            EntityType::StrategyTool => "strategy-tool",
            EntityType::Trend => "trend",
            EntityType::Knowledge => "knowledge",
            EntityType::Product => "product",
        }
    }

    /// Parse an entity type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "brand-asset" | "asset" => Some(EntityType::BrandAsset),
            "persona" => Some(EntityType::Persona),
            "research-plan" => Some(EntityType::ResearchPlan),
            "strategy-tool" => Some(EntityType::StrategyTool),
            "trend" => Some(EntityType::Trend),
            "knowledge" => Some(EntityType::Knowledge),
            "product" => Some(EntityType::Product),
            _ => None,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid entity type: {}", s))
    }
}

/// Fully qualified entity address: ids are only unique per type
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    /// Registry the entity lives in
    pub entity_type: EntityType,

    /// Id inside that registry
    pub id: EntityId,
}

impl EntityKey {
    /// Create a new key
    pub fn new(entity_type: EntityType, id: impl Into<EntityId>) -> Self {
        Self {
            entity_type,
            id: id.into(),
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.id)
    }
}

impl std::str::FromStr for EntityKey {
    type Err = String;

    /// Parse `type:id`, e.g. `brand-asset:1`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (entity_type, id) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected type:id, got '{}'", s))?;
        if id.is_empty() {
            return Err(format!("Missing id in '{}'", s));
        }
        Ok(Self::new(entity_type.parse::<EntityType>()?, id))
    }
}

/// Workflow status of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityStatus {
    /// Nothing has been done yet
    #[default]
    NotStarted,

    /// Work is underway
    InProgress,

    /// Waiting on research results
    AwaitingResearch,

    /// Research complete, waiting for sign-off
    ReadyToValidate,

    /// Signed off
    Validated,

    /// No longer maintained
    Archived,
}

impl EntityStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityStatus::NotStarted => "not-started",
            EntityStatus::InProgress => "in-progress",
            EntityStatus::AwaitingResearch => "awaiting-research",
            EntityStatus::ReadyToValidate => "ready-to-validate",
            EntityStatus::Validated => "validated",
            EntityStatus::Archived => "archived",
        }
    }
}

/// Research methods, in strategic rank order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MethodKind {
    /// Facilitated canvas workshop
    #[serde(alias = "canvas-workshop")]
    Workshop,

    /// One-on-one interviews
    Interviews,

    /// Strategic survey
    Questionnaire,

    /// AI-assisted exploration
    AiExploration,
}

impl MethodKind {
    /// Every method, best rank first
    pub const RANKED: [MethodKind; 4] = [
        MethodKind::Workshop,
        MethodKind::Interviews,
        MethodKind::Questionnaire,
        MethodKind::AiExploration,
    ];

    /// Strategic rank (1 = most valuable)
    pub fn rank(&self) -> u8 {
        match self {
            MethodKind::Workshop => 1,
            MethodKind::Interviews => 2,
            MethodKind::Questionnaire => 3,
            MethodKind::AiExploration => 4,
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            MethodKind::Workshop => "Workshop",
            MethodKind::Interviews => "1-on-1 Interviews",
            MethodKind::Questionnaire => "Strategic Survey",
            MethodKind::AiExploration => "AI Exploration",
        }
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::Workshop => "workshop",
            MethodKind::Interviews => "interviews",
            MethodKind::Questionnaire => "questionnaire",
            MethodKind::AiExploration => "ai-exploration",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Progress of a single research method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MethodStatus {
    /// Not started
    #[default]
    NotStarted,
    /// Underway
    InProgress,
    /// Done
    Completed,
    /// Requires an upgrade before it can run
    Locked,
}

/// A research method attached to an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchMethod {
    /// Which method
    pub method: MethodKind,

    /// How far along it is
    #[serde(default)]
    pub status: MethodStatus,
}

impl ResearchMethod {
    /// Create a method entry
    pub fn new(method: MethodKind, status: MethodStatus) -> Self {
        Self { method, status }
    }

    /// Whether the method has been completed
    pub fn is_completed(&self) -> bool {
        self.status == MethodStatus::Completed
    }
}

/// A strategy entity as supplied by its registry
///
/// Immutable from the engine's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Registry id
    pub id: EntityId,

    /// Display name (asset title, persona name, ...)
    pub name: String,

    /// Which registry the entity belongs to
    pub entity_type: EntityType,

    /// Subtype inside the registry (e.g. "Golden Circle")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Workflow status
    #[serde(default)]
    pub status: EntityStatus,

    /// Validated research coverage, 0-100
    #[serde(default)]
    pub research_coverage: u8,

    /// Whether the entity is part of the critical foundation
    #[serde(default)]
    pub is_critical: bool,

    /// Last modification (seconds since Unix epoch)
    pub last_updated_at: u64,

    /// Free text body used for keyword analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Research methods planned or run for this entity
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub research_methods: Vec<ResearchMethod>,
}

impl Entity {
    /// Create a new entity with neutral defaults
    pub fn new(entity_type: EntityType, id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            entity_type,
            kind: None,
            status: EntityStatus::NotStarted,
            research_coverage: 0,
            is_critical: false,
            last_updated_at: 0,
            content: None,
            research_methods: Vec::new(),
        }
    }

    /// Set the registry subtype
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the workflow status
    pub fn with_status(mut self, status: EntityStatus) -> Self {
        self.status = status;
        self
    }

    /// Set research coverage (clamped to 100)
    pub fn with_coverage(mut self, coverage: u8) -> Self {
        self.research_coverage = coverage.min(100);
        self
    }

    /// Mark as critical
    pub fn critical(mut self) -> Self {
        self.is_critical = true;
        self
    }

    /// Set the last update timestamp
    pub fn updated_at(mut self, timestamp: u64) -> Self {
        self.last_updated_at = timestamp;
        self
    }

    /// Set the free text content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Attach a research method
    pub fn with_method(mut self, method: MethodKind, status: MethodStatus) -> Self {
        self.research_methods.push(ResearchMethod::new(method, status));
        self
    }

    /// Fully qualified key of this entity
    pub fn key(&self) -> EntityKey {
        EntityKey::new(self.entity_type, self.id.clone())
    }

    /// Whether this entity is the one addressed by `entity_type`/`id`
    pub fn is(&self, entity_type: EntityType, id: &EntityId) -> bool {
        self.entity_type == entity_type && &self.id == id
    }

    /// Whether the entity's subtype matches `kind` (case-insensitive)
    pub fn has_kind(&self, kind: &str) -> bool {
        self.kind
            .as_deref()
            .is_some_and(|k| k.eq_ignore_ascii_case(kind))
    }

    /// Completed research methods
    pub fn completed_methods(&self) -> impl Iterator<Item = &ResearchMethod> {
        self.research_methods.iter().filter(|m| m.is_completed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_round_trip() {
        for entity_type in EntityType::ALL {
            assert_eq!(EntityType::parse(entity_type.as_str()), Some(entity_type));
        }
        assert_eq!(EntityType::parse("Brand_Asset"), Some(EntityType::BrandAsset));
        assert!(EntityType::parse("campaign").is_none());
    }

    #[test]
    fn test_entity_key_parse() {
        let key: EntityKey = "persona:p-1".parse().unwrap();
        assert_eq!(key, EntityKey::new(EntityType::Persona, "p-1"));
        assert_eq!(key.to_string(), "persona:p-1");

        assert!("persona".parse::<EntityKey>().is_err());
        assert!("persona:".parse::<EntityKey>().is_err());
        assert!("villain:1".parse::<EntityKey>().is_err());
    }

    #[test]
    fn test_method_ranking() {
        let ranks: Vec<u8> = MethodKind::RANKED.iter().map(|m| m.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert_eq!(MethodKind::Interviews.label(), "1-on-1 Interviews");
    }

    #[test]
    fn test_canvas_workshop_alias() {
        let method: ResearchMethod =
            serde_json::from_str(r#"{"method":"canvas-workshop","status":"completed"}"#).unwrap();
        assert_eq!(method.method, MethodKind::Workshop);
        assert!(method.is_completed());
    }

    #[test]
    fn test_entity_deserialize_defaults() {
        let entity: Entity = serde_json::from_str(
            r#"{"id":"1","name":"Golden Circle Framework","entity_type":"brand-asset","last_updated_at":10}"#,
        )
        .unwrap();
        assert_eq!(entity.status, EntityStatus::NotStarted);
        assert_eq!(entity.research_coverage, 0);
        assert!(!entity.is_critical);
        assert!(entity.research_methods.is_empty());
    }

    #[test]
    fn test_has_kind_is_case_insensitive() {
        let entity = Entity::new(EntityType::BrandAsset, "1", "GC").with_kind("Golden Circle");
        assert!(entity.has_kind("golden circle"));
        assert!(!entity.has_kind("Vision Statement"));
        assert!(!Entity::new(EntityType::Persona, "p", "P").has_kind("Golden Circle"));
    }
}
