//! Workspace file: the entity registries and relationship set the CLI works on.

use crate::error::{CliError, Result};
use brandgraph_domain::{Entity, EntityRegistry, Relationship};
use brandgraph_store::MemoryRelationshipStore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk workspace.
///
/// ```json
/// { "entities": [...], "relationships": [...] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceFile {
    /// Entities supplied by the registries
    #[serde(default)]
    pub entities: Vec<Entity>,

    /// Stored relationships
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// A loaded workspace.
pub struct Workspace {
    path: PathBuf,
    /// Entity registries
    pub registry: EntityRegistry,
    /// Relationship store seeded from the file
    pub store: MemoryRelationshipStore,
}

impl Workspace {
    /// Load a workspace file.
    ///
    /// Duplicate relationship ids are rejected.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Cannot read workspace {}: {}", path.display(), e))
        })?;
        let file: WorkspaceFile = serde_json::from_str(&contents)?;

        tracing::debug!(
            path = %path.display(),
            entities = file.entities.len(),
            relationships = file.relationships.len(),
            "Workspace loaded"
        );

        Ok(Self {
            path: path.to_path_buf(),
            registry: EntityRegistry::new(file.entities),
            store: MemoryRelationshipStore::from_relationships(file.relationships)?,
        })
    }

    /// Write the current relationship set back to the file.
    ///
    /// Entities are written back unchanged.
    pub fn save(&self) -> Result<()> {
        let file = WorkspaceFile {
            entities: self.registry.iter().cloned().collect(),
            relationships: self.store.as_slice().to_vec(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        tracing::info!(
            path = %self.path.display(),
            relationships = file.relationships.len(),
            "Workspace saved"
        );
        Ok(())
    }
}
