//! Anchor rules - which entities the generic rule scans hang off
//!
//! The missing-connection scan, the keyword-gap scan and the sequential
//! completion suggestions all need to know which entity plays the
//! "foundation" role. That coupling is domain data, so it lives here as
//! configuration instead of inside the rules.

use crate::entity::{Entity, EntityType};
use crate::registry::EntityRegistry;
use serde::{Deserialize, Serialize};

/// A canonical "finish X, then start Y" pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Succession {
    /// Subtype that must be validated first
    pub predecessor: String,

    /// Subtype that should follow
    pub successor: String,
}

impl Succession {
    /// Create a succession rule
    pub fn new(predecessor: impl Into<String>, successor: impl Into<String>) -> Self {
        Self {
            predecessor: predecessor.into(),
            successor: successor.into(),
        }
    }
}

/// Rule table mapping anchor roles to entity subtypes
///
/// # Examples
///
/// ```
/// use brandgraph_domain::AnchorRules;
///
/// let rules = AnchorRules::default();
/// assert_eq!(rules.anchor_kind, "Golden Circle");
/// assert_eq!(rules.successions.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorRules {
    /// Registry that holds the anchors
    #[serde(default = "default_anchor_type")]
    pub anchor_type: EntityType,

    /// Subtype of the foundational anchor every critical entity links to
    pub anchor_kind: String,

    /// Subtype whose text must echo the anchor's keywords
    pub keyword_partner_kind: String,

    /// Canonical completion order between subtypes
    #[serde(default)]
    pub successions: Vec<Succession>,
}

fn default_anchor_type() -> EntityType {
    EntityType::BrandAsset
}

impl Default for AnchorRules {
    fn default() -> Self {
        Self {
            anchor_type: EntityType::BrandAsset,
            anchor_kind: "Golden Circle".to_string(),
            keyword_partner_kind: "Vision Statement".to_string(),
            successions: vec![
                Succession::new("Golden Circle", "Brand Archetype"),
                Succession::new("Vision Statement", "Mission Statement"),
            ],
        }
    }
}

impl AnchorRules {
    /// Locate the foundational anchor
    pub fn anchor<'a>(&self, registry: &'a EntityRegistry) -> Option<&'a Entity> {
        registry.find_kind(self.anchor_type, &self.anchor_kind)
    }

    /// Locate the keyword partner of the anchor
    pub fn keyword_partner<'a>(&self, registry: &'a EntityRegistry) -> Option<&'a Entity> {
        registry.find_kind(self.anchor_type, &self.keyword_partner_kind)
    }
}
