//! Gatekeeper error types

use thiserror::Error;

/// Errors that can occur during gatekeeper operations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GateError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A generation attempt was driven through an illegal transition
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}
