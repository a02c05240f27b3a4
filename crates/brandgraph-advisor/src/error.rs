//! Error types for the suggestion engine

use thiserror::Error;

/// Errors that can occur while producing or filtering suggestions
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The dismissal store failed
    #[error("Dismissal store error: {0}")]
    Dismissal(String),
}
