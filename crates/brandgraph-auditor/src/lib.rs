//! Brandgraph Auditor
//!
//! Consistency checking for the relationship graph.
//!
//! # Overview
//!
//! A check runs five independent rule scans over one snapshot of the
//! store and the entity registries:
//!
//! | Scan | Severity | Priority | Emits |
//! |------|----------|----------|-------|
//! | Semantic conflicts | critical | 10 | one per `conflict` relationship |
//! | Missing connections | warning | 7 | one aggregate issue (auto-fixable) |
//! | Keyword gaps | warning | 6 | one issue when the anchor's concepts are missing from its partner |
//! | Orphaned entities | info | 4 | one per entity without relationships |
//! | Stale references | info | 3 | one per connected entity not updated within the window |
//!
//! The health score is `100 - 20*critical - 10*warning - 5*info`,
//! clamped to `[0, 100]`. Issues are ordered by priority, highest first.
//!
//! # Usage
//!
//! ## One-time Check
//!
//! ```
//! use brandgraph_auditor::ConsistencyChecker;
//! use brandgraph_domain::EntityRegistry;
//! use brandgraph_store::MemoryRelationshipStore;
//!
//! let store = MemoryRelationshipStore::new();
//! let registry = EntityRegistry::default();
//! let report = ConsistencyChecker::new(&store, &registry).check();
//! println!("Score: {}", report.overall_score);
//! ```
//!
//! ## Background Worker
//!
//! ```no_run
//! use brandgraph_auditor::{AuditConfig, AuditWorker};
//! use brandgraph_domain::EntityRegistry;
//! use brandgraph_store::SharedRelationshipStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SharedRelationshipStore::default();
//!     let registry = Arc::new(EntityRegistry::default());
//!     let worker = AuditWorker::new(AuditConfig::default())?;
//!
//!     let report = worker.spawn_check(store.snapshot(), registry).await?;
//!     println!("{} issues", report.total_issues);
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [audit]
//! stale_after_days = 180
//! recent_window_hours = 24
//! min_keyword_len = 5
//! max_keywords = 10
//! keyword_gap_threshold = 2
//! recently_updated_limit = 5
//! check_interval_minutes = 60
//! ```

#![warn(missing_docs)]

mod checker;
mod config;
mod error;
mod metrics;
mod report;
pub mod rules;
mod worker;

pub use checker::ConsistencyChecker;
pub use config::AuditConfig;
pub use error::AuditError;
pub use metrics::AuditMetrics;
pub use report::{
    health_score, ConsistencyIssue, ConsistencyReport, IssueKind, ReportSummary, Severity,
};
pub use rules::extract_keywords;
pub use worker::AuditWorker;
