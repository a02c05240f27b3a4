//! Suggest and dismiss command implementations.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::workspace::Workspace;
use brandgraph_advisor::{dismiss, filter_dismissed, SuggestionEngine};
use brandgraph_auditor::ConsistencyChecker;
use brandgraph_domain::DismissalStore;
use brandgraph_store::SqliteDismissalStore;
use std::fs;

/// Execute the suggest command.
///
/// Runs a consistency check first so the escalation heuristic sees the
/// current graph. Dismissed suggestions are hidden unless `all` is set.
pub fn execute_suggest(
    all: bool,
    workspace: &Workspace,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let report = ConsistencyChecker::new(&workspace.store, &workspace.registry)
        .with_config(config.audit.clone())
        .with_anchors(config.anchors.clone())
        .check();
    let suggestions = SuggestionEngine::new(&workspace.store, &workspace.registry)
        .with_config(config.advisor.clone())
        .with_anchors(config.anchors.clone())
        .suggestions(&report);

    let suggestions = if all {
        suggestions
    } else {
        filter_dismissed(suggestions, &open_dismissals(config)?)?
    };

    println!("{}", formatter.format_suggestions(&suggestions)?);
    Ok(())
}

/// Execute the dismiss command.
pub fn execute_dismiss(id: String, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut dismissals = open_dismissals(config)?;
    if dismissals.is_dismissed(&id)? {
        println!("{}", formatter.info(&format!("Already dismissed: {}", id)));
        return Ok(());
    }
    dismiss(&mut dismissals, &id)?;
    println!("{}", formatter.success(&format!("Suggestion dismissed: {}", id)));
    Ok(())
}

fn open_dismissals(config: &Config) -> Result<SqliteDismissalStore> {
    let path = config.dismissal_db()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(SqliteDismissalStore::new(&path)?)
}
