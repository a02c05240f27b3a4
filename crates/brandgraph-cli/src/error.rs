//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage error
    #[error("Store error: {0}")]
    Store(#[from] brandgraph_store::StoreError),

    /// Audit error
    #[error("Audit error: {0}")]
    Audit(#[from] brandgraph_auditor::AuditError),

    /// Suggestion error
    #[error("Advisor error: {0}")]
    Advisor(#[from] brandgraph_advisor::AdvisorError),

    /// Decision gate error
    #[error("Gate error: {0}")]
    Gate(#[from] brandgraph_gatekeeper::GateError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Referenced entity or relationship does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}
