//! Brandgraph Gatekeeper
//!
//! Decides whether research coverage is strong enough to act on.
//!
//! The Gatekeeper provides:
//! - Per-entity decision status (`blocked` / `decision-at-risk` / `safe-to-decide`)
//! - A decision gate over a selection, whose status is the worst member status
//! - The generation attempt state machine that consumes the gate
//!
//! # Examples
//!
//! ```
//! use brandgraph_domain::{Entity, EntityRegistry, EntityType};
//! use brandgraph_gatekeeper::{calculate_decision_gate, GateConfig, GateStatus};
//!
//! let registry = EntityRegistry::new(vec![
//!     Entity::new(EntityType::BrandAsset, "1", "Golden Circle").with_coverage(45),
//!     Entity::new(EntityType::Persona, "p-1", "Sarah").with_coverage(65),
//! ]);
//! let selection: Vec<_> = registry.iter().map(|e| e.key()).collect();
//!
//! let result = calculate_decision_gate(&selection, &registry, &GateConfig::default());
//! assert_eq!(result.status, GateStatus::Blocked);
//! assert!(!result.can_proceed);
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [gate]
//! blocked_below = 50
//! safe_at = 80
//! top_methods = 2
//! ```

#![warn(missing_docs)]

mod attempt;
mod config;
mod error;
mod gate;
mod status;

pub use attempt::{AttemptState, GenerationAttempt};
pub use config::GateConfig;
pub use error::GateError;
pub use gate::{calculate_decision_gate, DecisionGateResult, FailedItem, GateStatus};
pub use status::{calculate_decision_status, DecisionStatus, DecisionStatusInfo};
