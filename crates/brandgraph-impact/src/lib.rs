//! Brandgraph Impact Analysis
//!
//! Answers "what breaks if this entity changes?" for a single entity and
//! summarizes the shape of the whole graph.
//!
//! ## Components
//!
//! - [`ImpactAnalyzer`]: direct and indirect propagation with risk scoring
//! - [`RelationshipStats`]: counts, connectivity extremes and orphans
//!
//! Both are pure reads over a [`brandgraph_domain::RelationshipStore`].
//! When the store is shared, run them against a snapshot.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analyzer;
pub mod stats;

pub use analyzer::{AffectedByType, ImpactAnalysis, ImpactAnalyzer, RiskLevel, UpdateEstimate};
pub use stats::{ConnectionCount, RelationshipStats, StrengthCounts};

