//! Suggestion engine: runs the heuristics and ranks their output

use crate::heuristics::{AdviceContext, HEURISTICS};
use crate::suggestion::{rank, Suggestion};
use crate::{AdvisorConfig, AdvisorError};
use brandgraph_auditor::ConsistencyReport;
use brandgraph_domain::{
    current_timestamp, AnchorRules, DismissalStore, EntityRegistry, RelationshipStore,
};
use std::fmt::Display;

/// Produces ranked next-step suggestions for the current graph state
///
/// The engine reads the consistency report it is handed instead of running
/// a check of its own, so one check can feed both the report view and the
/// suggestions.
///
/// # Examples
///
/// ```
/// use brandgraph_advisor::SuggestionEngine;
/// use brandgraph_auditor::ConsistencyChecker;
/// use brandgraph_domain::EntityRegistry;
/// use brandgraph_store::MemoryRelationshipStore;
///
/// let store = MemoryRelationshipStore::new();
/// let registry = EntityRegistry::default();
/// let report = ConsistencyChecker::new(&store, &registry).check();
///
/// let suggestions = SuggestionEngine::new(&store, &registry).suggestions(&report);
/// assert!(suggestions.is_empty());
/// ```
pub struct SuggestionEngine<'a, S> {
    store: &'a S,
    registry: &'a EntityRegistry,
    config: AdvisorConfig,
    anchors: AnchorRules,
}

impl<'a, S: RelationshipStore> SuggestionEngine<'a, S> {
    /// Create an engine with default thresholds
    pub fn new(store: &'a S, registry: &'a EntityRegistry) -> Self {
        Self {
            store,
            registry,
            config: AdvisorConfig::default(),
            anchors: AnchorRules::default(),
        }
    }

    /// Use custom thresholds
    pub fn with_config(mut self, config: AdvisorConfig) -> Self {
        self.config = config;
        self
    }

    /// Use custom anchor rules
    pub fn with_anchors(mut self, anchors: AnchorRules) -> Self {
        self.anchors = anchors;
        self
    }

    /// Ranked suggestions against the current clock
    pub fn suggestions(&self, report: &ConsistencyReport) -> Vec<Suggestion> {
        self.suggestions_at(report, current_timestamp())
    }

    /// Ranked suggestions as of `now`
    pub fn suggestions_at(&self, report: &ConsistencyReport, now: u64) -> Vec<Suggestion> {
        let relationships = self.store.all();
        let ctx = AdviceContext {
            registry: self.registry,
            relationships: &relationships,
            report,
            config: &self.config,
            anchors: &self.anchors,
            now,
        };

        let mut suggestions = Vec::new();
        for (name, heuristic) in HEURISTICS {
            let found = heuristic(&ctx);
            tracing::debug!(heuristic = name, suggestions = found.len(), "Heuristic evaluated");
            suggestions.extend(found);
        }

        rank(&mut suggestions);
        tracing::info!(count = suggestions.len(), "Suggestions generated");
        suggestions
    }
}

/// Drop suggestions the user dismissed
///
/// Non-dismissible suggestions survive regardless of the dismissal set.
/// Order is preserved.
///
/// # Errors
///
/// Returns [`AdvisorError::Dismissal`] if the store cannot be read.
pub fn filter_dismissed<D>(
    suggestions: Vec<Suggestion>,
    dismissals: &D,
) -> Result<Vec<Suggestion>, AdvisorError>
where
    D: DismissalStore,
    D::Error: Display,
{
    let mut visible = Vec::with_capacity(suggestions.len());
    for suggestion in suggestions {
        if !suggestion.dismissible || !is_dismissed(dismissals, &suggestion.id)? {
            visible.push(suggestion);
        }
    }
    Ok(visible)
}

/// Record that the user dismissed a suggestion
///
/// Dismissing is idempotent. Ids that no heuristic currently emits are
/// accepted, so a dismissal outlives the condition that produced it.
///
/// # Errors
///
/// Returns [`AdvisorError::Dismissal`] if the store cannot be written.
pub fn dismiss<D>(dismissals: &mut D, suggestion_id: &str) -> Result<(), AdvisorError>
where
    D: DismissalStore,
    D::Error: Display,
{
    dismissals
        .dismiss(suggestion_id)
        .map_err(|e| AdvisorError::Dismissal(e.to_string()))
}

fn is_dismissed<D>(dismissals: &D, suggestion_id: &str) -> Result<bool, AdvisorError>
where
    D: DismissalStore,
    D::Error: Display,
{
    dismissals
        .is_dismissed(suggestion_id)
        .map_err(|e| AdvisorError::Dismissal(e.to_string()))
}
