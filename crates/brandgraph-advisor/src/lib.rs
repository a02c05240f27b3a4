//! Brandgraph Advisor
//!
//! Ranked next-step suggestions derived from the entity registries, the
//! relationship graph and the latest consistency report.
//!
//! # Heuristics
//!
//! | Heuristic | Emits | Priority |
//! |-----------|-------|----------|
//! | Sequential completion | `suggest-<successor>`, `suggest-first-persona` | high |
//! | Missing relationships | `link-personas-anchor` | medium |
//! | Research diversity | `diversify-research` | medium |
//! | Consistency escalation | `fix-critical-issues` (urgent, not dismissible) or `fix-warnings` | critical / medium |
//! | Stale data | `refresh-stale` | low |
//! | Validation opportunities | `validate-ready-assets`, `validate-high-coverage` | high / medium |
//! | Low coverage | `boost-critical-coverage` | high |
//!
//! Suggestions are ranked by `priority weight + 50 if urgent + 20 if high
//! impact`, ties keeping evaluation order.
//!
//! # Dismissals
//!
//! Dismissed ids are kept in a [`DismissalStore`](brandgraph_domain::DismissalStore).
//! [`filter_dismissed`] hides them, except suggestions marked not
//! dismissible.
//!
//! # Configuration
//!
//! ```toml
//! [advisor]
//! stale_after_days = 180
//! high_coverage_threshold = 75
//! low_coverage_threshold = 50
//! first_persona_min_validated = 3
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
pub mod heuristics;
mod suggestion;

pub use config::AdvisorConfig;
pub use engine::{dismiss, filter_dismissed, SuggestionEngine};
pub use error::AdvisorError;
pub use suggestion::{rank, Impact, Priority, Suggestion, SuggestionKind, SuggestionStat};
