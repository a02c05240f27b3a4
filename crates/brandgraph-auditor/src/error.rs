//! Error types for audit operations

use thiserror::Error;

/// Errors that can occur while auditing the graph
///
/// A scan that finds nothing is not an error; only misconfiguration and
/// background task failures are.
#[derive(Error, Debug)]
pub enum AuditError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}
