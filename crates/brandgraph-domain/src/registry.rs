//! Entity registry - read-only view over the collaborator collections

use crate::entity::{Entity, EntityId, EntityKey, EntityStatus, EntityType, UNKNOWN_ENTITY};
use serde::{Deserialize, Serialize};

/// The typed entity collections supplied by collaborators
///
/// Insertion order is preserved; every scan that reports "first" or
/// "top N" results walks the registry in this order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
}

impl EntityRegistry {
    /// Create a registry from entities of any type
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    /// Add an entity
    pub fn insert(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Every entity in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Entities of one type
    pub fn of_type(&self, entity_type: EntityType) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |e| e.entity_type == entity_type)
    }

    /// Find an entity by type and id
    pub fn find(&self, entity_type: EntityType, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.is(entity_type, id))
    }

    /// Find an entity by key
    pub fn get(&self, key: &EntityKey) -> Option<&Entity> {
        self.find(key.entity_type, &key.id)
    }

    /// First entity of `entity_type` whose subtype is `kind`
    pub fn find_kind(&self, entity_type: EntityType, kind: &str) -> Option<&Entity> {
        self.of_type(entity_type).find(|e| e.has_kind(kind))
    }

    /// First entity of any type whose subtype is `kind`
    pub fn find_any_kind(&self, kind: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.has_kind(kind))
    }

    /// Display name, degrading to "Unknown Entity"
    pub fn name_of(&self, entity_type: EntityType, id: &EntityId) -> String {
        self.find(entity_type, id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| UNKNOWN_ENTITY.to_string())
    }

    /// Entities with the given workflow status
    pub fn with_status(&self, status: EntityStatus) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.status == status)
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<Entity> for EntityRegistry {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> EntityRegistry {
        EntityRegistry::new(vec![
            Entity::new(EntityType::BrandAsset, "1", "Golden Circle Framework")
                .with_kind("Golden Circle"),
            Entity::new(EntityType::BrandAsset, "2", "Brand Vision").with_kind("Vision Statement"),
            Entity::new(EntityType::Persona, "1", "Sarah the Startup Founder"),
        ])
    }

    #[test]
    fn test_find_is_type_scoped() {
        let registry = registry();
        let id = EntityId::new("1");
        assert_eq!(
            registry.find(EntityType::Persona, &id).unwrap().name,
            "Sarah the Startup Founder"
        );
        assert_eq!(
            registry.find(EntityType::BrandAsset, &id).unwrap().name,
            "Golden Circle Framework"
        );
        assert!(registry.find(EntityType::Trend, &id).is_none());
    }

    #[test]
    fn test_unknown_name_degrades() {
        let registry = registry();
        assert_eq!(
            registry.name_of(EntityType::Product, &EntityId::new("x")),
            UNKNOWN_ENTITY
        );
    }

    #[test]
    fn test_find_kind() {
        let registry = registry();
        assert_eq!(
            registry
                .find_kind(EntityType::BrandAsset, "vision statement")
                .unwrap()
                .id
                .as_str(),
            "2"
        );
        assert!(registry.find_kind(EntityType::Persona, "Golden Circle").is_none());
        assert_eq!(registry.of_type(EntityType::BrandAsset).count(), 2);
    }
}
