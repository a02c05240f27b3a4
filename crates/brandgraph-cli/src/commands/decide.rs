//! Decision status and gate command implementations.

use crate::cli::{EntityArgs, GateArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::workspace::Workspace;
use brandgraph_domain::EntityId;
use brandgraph_gatekeeper::{calculate_decision_gate, calculate_decision_status};

/// Execute the status command.
pub fn execute_status(
    args: EntityArgs,
    workspace: &Workspace,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let id = EntityId::new(args.id);
    let entity = workspace
        .registry
        .find(args.entity_type, &id)
        .ok_or_else(|| CliError::NotFound(format!("entity {}:{}", args.entity_type, id)))?;

    let info = calculate_decision_status(entity, &config.gate);
    println!("{}", formatter.format_status(&entity.name, &info)?);
    Ok(())
}

/// Execute the gate command.
///
/// Unknown entities in the selection are skipped with a warning.
pub fn execute_gate(
    args: GateArgs,
    workspace: &Workspace,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    for key in &args.selection {
        if workspace.registry.get(key).is_none() {
            eprintln!("{}", formatter.warning(&format!("Skipping unknown entity {}", key)));
        }
    }

    let result = calculate_decision_gate(&args.selection, &workspace.registry, &config.gate);
    println!("{}", formatter.format_gate(&result)?);
    Ok(())
}
