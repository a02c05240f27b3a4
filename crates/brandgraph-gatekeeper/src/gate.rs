//! Multi-entity decision gate for campaign generation

use crate::status::{calculate_decision_status, DecisionStatus};
use crate::GateConfig;
use brandgraph_domain::{EntityId, EntityKey, EntityRegistry, EntityType, MethodKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate status of a selection, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GateStatus {
    /// Every member is safe
    Safe,
    /// At least one member is at risk, none blocked
    AtRisk,
    /// At least one member is blocked
    Blocked,
}

impl GateStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            GateStatus::Safe => "safe",
            GateStatus::AtRisk => "at-risk",
            GateStatus::Blocked => "blocked",
        }
    }

    /// Status a single member contributes to the aggregate
    pub fn from_decision(status: DecisionStatus) -> Self {
        match status {
            DecisionStatus::SafeToDecide => GateStatus::Safe,
            DecisionStatus::DecisionAtRisk => GateStatus::AtRisk,
            DecisionStatus::Blocked => GateStatus::Blocked,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            GateStatus::Safe => "All selected data is properly validated. Safe to generate.",
            GateStatus::AtRisk => "You can proceed, but some elements have limited validation.",
            GateStatus::Blocked => {
                "Campaign generation is blocked. Fix critical validation issues first."
            }
        }
    }
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selected entity that is not safe to decide on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedItem {
    /// Entity id
    pub id: EntityId,
    /// Display name
    pub name: String,
    /// Registry
    pub entity_type: EntityType,
    /// Research coverage
    pub coverage: u8,
    /// Why it failed
    pub status: DecisionStatus,
    /// Best-ranked method still missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_top_method: Option<MethodKind>,
}

/// Verdict of the gate over a selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionGateResult {
    /// Worst member status
    pub status: GateStatus,
    /// False only when blocked
    pub can_proceed: bool,
    /// Members that are at risk or blocked, in selection order
    pub failed_items: Vec<FailedItem>,
    /// User-facing verdict
    pub message: String,
}

/// Evaluate the gate over a selection of entities
///
/// Unknown keys are skipped. An empty selection is safe.
///
/// # Examples
///
/// ```
/// use brandgraph_domain::{Entity, EntityRegistry, EntityType};
/// use brandgraph_gatekeeper::{calculate_decision_gate, GateConfig, GateStatus};
///
/// let registry = EntityRegistry::new(vec![
///     Entity::new(EntityType::BrandAsset, "1", "Golden Circle").with_coverage(90),
/// ]);
/// let selection = vec![Entity::new(EntityType::BrandAsset, "1", "").key()];
/// let result = calculate_decision_gate(&selection, &registry, &GateConfig::default());
/// assert_eq!(result.status, GateStatus::Safe);
/// assert!(result.can_proceed);
/// ```
pub fn calculate_decision_gate(
    selection: &[EntityKey],
    registry: &EntityRegistry,
    config: &GateConfig,
) -> DecisionGateResult {
    let mut status = GateStatus::Safe;
    let mut failed_items = Vec::new();

    for key in selection {
        let Some(entity) = registry.get(key) else {
            tracing::debug!(
                entity_type = %key.entity_type,
                entity_id = %key.id,
                "Selected entity not found, skipping"
            );
            continue;
        };

        let info = calculate_decision_status(entity, config);
        let member = GateStatus::from_decision(info.status);
        status = status.max(member);

        if member != GateStatus::Safe {
            failed_items.push(FailedItem {
                id: entity.id.clone(),
                name: entity.name.clone(),
                entity_type: entity.entity_type,
                coverage: info.coverage,
                status: info.status,
                missing_top_method: info.missing_top_methods.first().copied(),
            });
        }
    }

    tracing::info!(
        status = status.as_str(),
        selected = selection.len(),
        failed = failed_items.len(),
        "Decision gate evaluated"
    );

    DecisionGateResult {
        status,
        can_proceed: status != GateStatus::Blocked,
        failed_items,
        message: status.message().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandgraph_domain::Entity;

    fn key(entity_type: EntityType, id: &str) -> EntityKey {
        EntityKey::new(entity_type, EntityId::new(id))
    }

    #[test]
    fn test_empty_selection_is_safe() {
        let result = calculate_decision_gate(&[], &EntityRegistry::default(), &GateConfig::default());
        assert_eq!(result.status, GateStatus::Safe);
        assert!(result.can_proceed);
        assert!(result.failed_items.is_empty());
        assert_eq!(
            result.message,
            "All selected data is properly validated. Safe to generate."
        );
    }

    #[test]
    fn test_at_risk_can_proceed() {
        let registry = EntityRegistry::new(vec![
            Entity::new(EntityType::Persona, "p-1", "Sarah").with_coverage(65),
            Entity::new(EntityType::BrandAsset, "1", "Golden Circle").with_coverage(95),
        ]);
        let selection = [
            key(EntityType::Persona, "p-1"),
            key(EntityType::BrandAsset, "1"),
            key(EntityType::BrandAsset, "missing"),
        ];
        let result = calculate_decision_gate(&selection, &registry, &GateConfig::default());

        assert_eq!(result.status, GateStatus::AtRisk);
        assert!(result.can_proceed);
        assert_eq!(result.failed_items.len(), 1);
        assert_eq!(result.failed_items[0].name, "Sarah");
        assert_eq!(result.failed_items[0].missing_top_method, Some(MethodKind::Workshop));
    }

    #[test]
    fn test_ids_are_typed() {
        // a persona sharing the id of a blocked asset is its own entity
        let registry = EntityRegistry::new(vec![
            Entity::new(EntityType::BrandAsset, "1", "Weak asset").with_coverage(10),
            Entity::new(EntityType::Persona, "1", "Strong persona").with_coverage(90),
        ]);
        let result = calculate_decision_gate(
            &[key(EntityType::Persona, "1")],
            &registry,
            &GateConfig::default(),
        );
        assert_eq!(result.status, GateStatus::Safe);
    }

    #[test]
    fn test_status_order() {
        assert!(GateStatus::Blocked > GateStatus::AtRisk);
        assert!(GateStatus::AtRisk > GateStatus::Safe);
    }
}
