//! Brandgraph Storage Layer
//!
//! Implements the [`RelationshipStore`](brandgraph_domain::RelationshipStore)
//! and [`DismissalStore`](brandgraph_domain::DismissalStore) traits.
//!
//! # Architecture
//!
//! - [`MemoryRelationshipStore`]: the edge set, owned by the caller
//! - [`SharedRelationshipStore`]: cloneable handle that serializes CRUD and
//!   hands out immutable snapshots for analysis
//! - [`SqliteDismissalStore`]: durable set of dismissed suggestion ids
//! - [`MemoryDismissalStore`]: process-local dismissal set
//!
//! # Examples
//!
//! ```
//! use brandgraph_store::{MemoryRelationshipStore, SharedRelationshipStore};
//!
//! let shared = SharedRelationshipStore::new(MemoryRelationshipStore::new());
//! let snapshot = shared.snapshot();
//! assert!(snapshot.as_slice().is_empty());
//! ```

#![warn(missing_docs)]

mod dismissal;
mod memory;
mod shared;

pub use dismissal::{MemoryDismissalStore, SqliteDismissalStore};
pub use memory::MemoryRelationshipStore;
pub use shared::SharedRelationshipStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A relationship id is already taken
    #[error("Duplicate relationship id: {0}")]
    DuplicateId(String),
}
