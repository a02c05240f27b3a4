//! Relationship graph commands: impact, relations, link, unlink, stats.

use crate::cli::{EntityArgs, LinkArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::workspace::Workspace;
use brandgraph_domain::{
    EntityId, EntityKey, EntityRegistry, NewRelationship, RelationshipId, RelationshipStore,
};
use brandgraph_impact::{ImpactAnalyzer, RelationshipStats};

/// Execute the impact command.
pub fn execute_impact(args: EntityArgs, workspace: &Workspace, formatter: &Formatter) -> Result<()> {
    let analysis = ImpactAnalyzer::new(&workspace.store, &workspace.registry)
        .analyze(args.entity_type, &EntityId::new(args.id));
    println!("{}", formatter.format_impact(&analysis)?);
    Ok(())
}

/// Execute the relations command.
pub fn execute_relations(
    args: EntityArgs,
    workspace: &Workspace,
    formatter: &Formatter,
) -> Result<()> {
    let relationships = workspace
        .store
        .for_entity(args.entity_type, &EntityId::new(args.id));
    println!("{}", formatter.format_relationships(&relationships)?);
    Ok(())
}

/// Execute the stats command.
pub fn execute_stats(workspace: &Workspace, formatter: &Formatter) -> Result<()> {
    let stats = RelationshipStats::compute(&workspace.store, &workspace.registry);
    println!("{}", formatter.format_stats(&stats)?);
    Ok(())
}

/// Execute the link command.
///
/// Both ends must exist in the registries; names are copied from there.
pub fn execute_link(args: LinkArgs, workspace: &mut Workspace, formatter: &Formatter) -> Result<()> {
    let relationship = build_relationship(&args, &workspace.registry)?;
    let created = workspace.store.create(relationship);
    workspace.save()?;
    println!("{}", formatter.success(&format!("Relationship created: {}", created.id)));
    Ok(())
}

/// Execute the unlink command.
pub fn execute_unlink(id: String, workspace: &mut Workspace, formatter: &Formatter) -> Result<()> {
    if !workspace.store.delete(&RelationshipId::new(id.as_str())) {
        return Err(CliError::NotFound(format!("relationship {}", id)));
    }
    workspace.save()?;
    println!("{}", formatter.success(&format!("Relationship deleted: {}", id)));
    Ok(())
}

fn build_relationship(args: &LinkArgs, registry: &EntityRegistry) -> Result<NewRelationship> {
    let source = resolve_name(&args.source, registry)?;
    let target = resolve_name(&args.target, registry)?;

    let mut relationship = NewRelationship::between(
        (args.source.entity_type, args.source.id.as_str(), source.as_str()),
        (args.target.entity_type, args.target.id.as_str(), target.as_str()),
        args.relation,
        args.strength,
    );
    if let Some(status) = args.status {
        relationship = relationship.with_status(status.into());
    }
    if let Some(notes) = &args.notes {
        relationship = relationship.with_notes(notes.as_str());
    }
    Ok(relationship)
}

fn resolve_name(key: &EntityKey, registry: &EntityRegistry) -> Result<String> {
    registry
        .get(key)
        .map(|e| e.name.clone())
        .ok_or_else(|| CliError::NotFound(format!("entity {}", key)))
}
