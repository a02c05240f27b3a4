//! Blast-radius analysis for a single entity

use brandgraph_domain::{
    EntityId, EntityReference, EntityRegistry, EntityType, Relationship, RelationshipStatus,
    RelationshipStore, Strength,
};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Risk of changing or deleting an entity
///
/// Derived only from the number of strong direct relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    /// No strong dependencies
    Low,
    /// 1-2 strong dependencies
    Medium,
    /// 3-4 strong dependencies
    High,
    /// 5 or more strong dependencies
    Critical,
}

impl RiskLevel {
    /// Classify by the number of strong direct relationships
    ///
    /// # Examples
    ///
    /// ```
    /// use brandgraph_impact::RiskLevel;
    ///
    /// assert_eq!(RiskLevel::from_strong_count(0), RiskLevel::Low);
    /// assert_eq!(RiskLevel::from_strong_count(3), RiskLevel::High);
    /// assert_eq!(RiskLevel::from_strong_count(6), RiskLevel::Critical);
    /// ```
    pub fn from_strong_count(count: usize) -> Self {
        match count {
            0 => RiskLevel::Low,
            1..=2 => RiskLevel::Medium,
            3..=4 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rough effort needed to propagate a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum UpdateEstimate {
    /// No direct relationships
    #[serde(rename = "<5 minutes")]
    UnderFiveMinutes,
    /// 1-2 direct relationships
    #[serde(rename = "15-30 minutes")]
    QuarterToHalfHour,
    /// 3-5 direct relationships
    #[serde(rename = "1-2 hours")]
    OneToTwoHours,
    /// 6-10 direct relationships
    #[serde(rename = "2-4 hours")]
    TwoToFourHours,
    /// More than 10 direct relationships
    #[serde(rename = "4+ hours")]
    FourHoursPlus,
}

impl UpdateEstimate {
    /// Step function over the number of direct relationships
    pub fn from_direct_count(count: usize) -> Self {
        match count {
            0 => UpdateEstimate::UnderFiveMinutes,
            1..=2 => UpdateEstimate::QuarterToHalfHour,
            3..=5 => UpdateEstimate::OneToTwoHours,
            6..=10 => UpdateEstimate::TwoToFourHours,
            _ => UpdateEstimate::FourHoursPlus,
        }
    }

    /// Human readable bucket
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateEstimate::UnderFiveMinutes => "<5 minutes",
            UpdateEstimate::QuarterToHalfHour => "15-30 minutes",
            UpdateEstimate::OneToTwoHours => "1-2 hours",
            UpdateEstimate::TwoToFourHours => "2-4 hours",
            UpdateEstimate::FourHoursPlus => "4+ hours",
        }
    }
}

impl fmt::Display for UpdateEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directly affected entities, bucketed by type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AffectedByType {
    /// Personas
    pub personas: Vec<EntityReference>,
    /// Brand assets
    pub brand_assets: Vec<EntityReference>,
    /// Research plans
    pub research_plans: Vec<EntityReference>,
    /// Strategy tools
    pub strategy_tools: Vec<EntityReference>,
    /// Trends
    pub trends: Vec<EntityReference>,
    /// Knowledge items
    pub knowledge: Vec<EntityReference>,
    /// Products
    pub products: Vec<EntityReference>,
}

impl AffectedByType {
    /// Put a reference into the bucket for its type
    pub fn push(&mut self, reference: EntityReference) {
        self.bucket_mut(reference.entity_type).push(reference);
    }

    /// References of one type
    pub fn bucket(&self, entity_type: EntityType) -> &[EntityReference] {
        match entity_type {
            EntityType::Persona => &self.personas,
            EntityType::BrandAsset => &self.brand_assets,
            EntityType::ResearchPlan => &self.research_plans,
            EntityType::StrategyTool => &self.strategy_tools,
            EntityType::Trend => &self.trends,
            EntityType::Knowledge => &self.knowledge,
            EntityType::Product => &self.products,
        }
    }

    fn bucket_mut(&mut self, entity_type: EntityType) -> &mut Vec<EntityReference> {
        match entity_type {
            EntityType::Persona => &mut self.personas,
            EntityType::BrandAsset => &mut self.brand_assets,
            EntityType::ResearchPlan => &mut self.research_plans,
            EntityType::StrategyTool => &mut self.strategy_tools,
            EntityType::Trend => &mut self.trends,
            EntityType::Knowledge => &mut self.knowledge,
            EntityType::Product => &mut self.products,
        }
    }

    /// Total references across all buckets
    pub fn total(&self) -> usize {
        EntityType::ALL.iter().map(|t| self.bucket(*t).len()).sum()
    }
}

/// Point-in-time snapshot of what changing one entity would touch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactAnalysis {
    /// Analyzed entity type
    pub entity_type: EntityType,
    /// Analyzed entity id
    pub entity_id: EntityId,
    /// Analyzed entity name ("Unknown Entity" if not registered)
    pub entity_name: String,
    /// Risk derived from strong direct relationships
    pub risk_level: RiskLevel,
    /// Active relationships touching the entity
    pub direct: Vec<Relationship>,
    /// Second-level relationships of directly connected entities
    pub indirect: Vec<Relationship>,
    /// Direct relationships grouped by the other entity's type
    pub affected_by_type: AffectedByType,
    /// Strong direct relationships
    pub critical_relationships: Vec<Relationship>,
    /// Ordered advice
    pub recommendations: Vec<String>,
    /// Effort bucket
    pub estimated_update_time: UpdateEstimate,
}

impl ImpactAnalysis {
    /// Number of direct impacts
    pub fn direct_impacts(&self) -> usize {
        self.direct.len()
    }

    /// Number of indirect impacts
    pub fn indirect_impacts(&self) -> usize {
        self.indirect.len()
    }

    /// Direct plus indirect impacts
    pub fn total_affected(&self) -> usize {
        self.direct.len() + self.indirect.len()
    }
}

/// Computes impact analyses over a relationship store
///
/// # Examples
///
/// ```
/// use brandgraph_domain::{EntityId, EntityRegistry, EntityType};
/// use brandgraph_impact::{ImpactAnalyzer, RiskLevel};
/// use brandgraph_store::MemoryRelationshipStore;
///
/// let store = MemoryRelationshipStore::new();
/// let registry = EntityRegistry::default();
/// let analysis = ImpactAnalyzer::new(&store, &registry)
///     .analyze(EntityType::BrandAsset, &EntityId::new("1"));
/// assert_eq!(analysis.risk_level, RiskLevel::Low);
/// assert_eq!(analysis.entity_name, "Unknown Entity");
/// ```
pub struct ImpactAnalyzer<'a, S> {
    store: &'a S,
    registry: &'a EntityRegistry,
}

impl<'a, S: RelationshipStore> ImpactAnalyzer<'a, S> {
    /// Create an analyzer over a store and the entity registry
    pub fn new(store: &'a S, registry: &'a EntityRegistry) -> Self {
        Self { store, registry }
    }

    /// Analyze the blast radius of changing `entity_type`/`id`
    pub fn analyze(&self, entity_type: EntityType, id: &EntityId) -> ImpactAnalysis {
        let direct: Vec<Relationship> = self
            .store
            .for_entity(entity_type, id)
            .into_iter()
            .filter(|r| r.status == RelationshipStatus::Active)
            .collect();

        let indirect = self.indirect_relationships(entity_type, id, &direct);

        let mut affected_by_type = AffectedByType::default();
        for rel in &direct {
            if let Some(other) = rel.other_side(entity_type, id) {
                affected_by_type.push(other);
            }
        }

        let critical_relationships: Vec<Relationship> = direct
            .iter()
            .filter(|r| r.strength == Strength::Strong)
            .cloned()
            .collect();
        let risk_level = RiskLevel::from_strong_count(critical_relationships.len());

        let recommendations =
            recommendations(risk_level, critical_relationships.len(), &affected_by_type);

        let entity_name = self.registry.name_of(entity_type, id);
        if self.registry.find(entity_type, id).is_none() {
            tracing::warn!(entity = %id, entity_type = %entity_type, "Impact analysis for unregistered entity");
        }

        tracing::debug!(
            entity = %id,
            direct = direct.len(),
            indirect = indirect.len(),
            risk = %risk_level,
            "Impact analysis computed"
        );

        ImpactAnalysis {
            entity_type,
            entity_id: id.clone(),
            entity_name,
            risk_level,
            estimated_update_time: UpdateEstimate::from_direct_count(direct.len()),
            direct,
            indirect,
            affected_by_type,
            critical_relationships,
            recommendations,
        }
    }

    /// Relationships one hop beyond the direct set
    ///
    /// Skips the edge that produced the connection, every edge touching the
    /// original entity, and duplicates (by id).
    fn indirect_relationships(
        &self,
        entity_type: EntityType,
        id: &EntityId,
        direct: &[Relationship],
    ) -> Vec<Relationship> {
        let mut seen = HashSet::new();
        let mut indirect = Vec::new();

        for rel in direct {
            let Some(other) = rel.other_side(entity_type, id) else {
                continue;
            };
            for second in self.store.for_entity(other.entity_type, &other.id) {
                if second.id == rel.id || second.touches(entity_type, id) {
                    continue;
                }
                if seen.insert(second.id.clone()) {
                    indirect.push(second);
                }
            }
        }

        indirect
    }
}

fn recommendations(
    risk_level: RiskLevel,
    strong_count: usize,
    affected: &AffectedByType,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if risk_level >= RiskLevel::High {
        recommendations.push("Create a backup snapshot before making changes".to_string());
        recommendations.push("Review all strongly connected entities for alignment".to_string());
        recommendations.push("Consider notifying team members about upcoming changes".to_string());
    }

    if strong_count > 0 {
        recommendations.push(format!(
            "Update {} strongly connected entities to maintain consistency",
            strong_count
        ));
    }

    let personas = affected.bucket(EntityType::Persona).len();
    if personas > 0 {
        recommendations.push(format!(
            "Validate changes with {} affected persona(s)",
            personas
        ));
    }

    if !affected.bucket(EntityType::ResearchPlan).is_empty() {
        recommendations.push("Consider re-running affected research to validate changes".to_string());
    }

    if recommendations.is_empty() {
        recommendations.push("No critical dependencies detected - safe to proceed".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandgraph_domain::{Entity, NewRelationship, RelationType};
    use brandgraph_store::MemoryRelationshipStore;

    fn gc() -> (EntityType, &'static str, &'static str) {
        (EntityType::BrandAsset, "1", "Golden Circle Framework")
    }

    fn registry() -> EntityRegistry {
        EntityRegistry::new(vec![Entity::new(
            EntityType::BrandAsset,
            "1",
            "Golden Circle Framework",
        )])
    }

    fn link_persona(store: &mut MemoryRelationshipStore, persona: &str, strength: Strength) {
        store.create(NewRelationship::between(
            gc(),
            (EntityType::Persona, persona, persona),
            RelationType::Targets,
            strength,
        ));
    }

    #[test]
    fn test_estimate_bucket_boundaries() {
        let expected = [
            (0, "<5 minutes"),
            (1, "15-30 minutes"),
            (2, "15-30 minutes"),
            (3, "1-2 hours"),
            (5, "1-2 hours"),
            (6, "2-4 hours"),
            (10, "2-4 hours"),
            (11, "4+ hours"),
        ];
        for (count, label) in expected {
            assert_eq!(UpdateEstimate::from_direct_count(count).as_str(), label, "count {}", count);
        }
    }

    #[test]
    fn test_risk_breakpoints() {
        assert_eq!(RiskLevel::from_strong_count(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_strong_count(1), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_strong_count(2), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_strong_count(3), RiskLevel::High);
        assert_eq!(RiskLevel::from_strong_count(4), RiskLevel::High);
        assert_eq!(RiskLevel::from_strong_count(5), RiskLevel::Critical);
    }

    #[test]
    fn test_six_strong_relationships() {
        let mut store = MemoryRelationshipStore::new();
        for i in 0..6 {
            link_persona(&mut store, &format!("p-{}", i), Strength::Strong);
        }
        let registry = registry();

        let analysis =
            ImpactAnalyzer::new(&store, &registry).analyze(EntityType::BrandAsset, &"1".into());

        assert_eq!(analysis.risk_level, RiskLevel::Critical);
        assert_eq!(analysis.estimated_update_time.as_str(), "2-4 hours");
        assert_eq!(analysis.entity_name, "Golden Circle Framework");
        assert_eq!(analysis.affected_by_type.personas.len(), 6);
        assert_eq!(analysis.critical_relationships.len(), 6);
        assert_eq!(
            analysis.recommendations,
            vec![
                "Create a backup snapshot before making changes".to_string(),
                "Review all strongly connected entities for alignment".to_string(),
                "Consider notifying team members about upcoming changes".to_string(),
                "Update 6 strongly connected entities to maintain consistency".to_string(),
                "Validate changes with 6 affected persona(s)".to_string(),
            ]
        );
    }

    #[test]
    fn test_isolated_entity_is_safe() {
        let store = MemoryRelationshipStore::new();
        let registry = registry();
        let analysis =
            ImpactAnalyzer::new(&store, &registry).analyze(EntityType::BrandAsset, &"1".into());

        assert_eq!(analysis.risk_level, RiskLevel::Low);
        assert_eq!(analysis.direct_impacts(), 0);
        assert_eq!(
            analysis.recommendations,
            vec!["No critical dependencies detected - safe to proceed".to_string()]
        );
    }

    #[test]
    fn test_only_active_relationships_are_direct() {
        let mut store = MemoryRelationshipStore::new();
        link_persona(&mut store, "p-1", Strength::Strong);
        store.create(
            NewRelationship::between(
                gc(),
                (EntityType::Persona, "p-2", "p-2"),
                RelationType::Targets,
                Strength::Strong,
            )
            .with_status(RelationshipStatus::Archived),
        );
        let registry = registry();

        let analysis =
            ImpactAnalyzer::new(&store, &registry).analyze(EntityType::BrandAsset, &"1".into());
        assert_eq!(analysis.direct_impacts(), 1);
        assert_eq!(analysis.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_grouping_uses_the_other_side() {
        let mut store = MemoryRelationshipStore::new();
        // Research plan points at the asset; the asset is the target here
        store.create(NewRelationship::between(
            (EntityType::ResearchPlan, "rp-1", "Brand Perception Study"),
            gc(),
            RelationType::Validates,
            Strength::Medium,
        ));
        let registry = registry();

        let analysis =
            ImpactAnalyzer::new(&store, &registry).analyze(EntityType::BrandAsset, &"1".into());
        assert_eq!(analysis.affected_by_type.research_plans.len(), 1);
        assert!(analysis.affected_by_type.brand_assets.is_empty());
        assert_eq!(
            analysis.recommendations,
            vec!["Consider re-running affected research to validate changes".to_string()]
        );
    }

    #[test]
    fn test_indirect_excludes_loops_and_duplicates() {
        let mut store = MemoryRelationshipStore::new();
        link_persona(&mut store, "p-1", Strength::Medium);
        link_persona(&mut store, "p-2", Strength::Medium);
        // p-1 <-> p-2 is reachable from both personas but counted once
        store.create(NewRelationship::between(
            (EntityType::Persona, "p-1", "p-1"),
            (EntityType::Persona, "p-2", "p-2"),
            RelationType::Influences,
            Strength::Weak,
        ));
        // second edge back to the original entity is not indirect
        store.create(NewRelationship::between(
            (EntityType::Persona, "p-1", "p-1"),
            gc(),
            RelationType::References,
            Strength::Weak,
        ));
        let registry = registry();

        let analysis =
            ImpactAnalyzer::new(&store, &registry).analyze(EntityType::BrandAsset, &"1".into());
        assert_eq!(analysis.direct_impacts(), 3);
        assert_eq!(analysis.indirect_impacts(), 1);
        assert_eq!(analysis.total_affected(), 4);
    }
}
