//! Gatekeeper configuration

use crate::GateError;
use serde::{Deserialize, Serialize};

/// Coverage thresholds for the decision gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Coverage below which decisions are blocked
    pub blocked_below: u8,

    /// Coverage at which decisions are safe
    pub safe_at: u8,

    /// How many of the best-ranked methods must be completed
    pub top_methods: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            blocked_below: 50,
            safe_at: 80,
            top_methods: 2,
        }
    }
}

impl GateConfig {
    /// Create a strict configuration (higher bars for every status)
    pub fn strict() -> Self {
        Self {
            blocked_below: 60,
            safe_at: 90,
            top_methods: 3,
        }
    }

    /// Check that the thresholds are in range and ordered
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Config`] if `safe_at` exceeds 100, if
    /// `blocked_below` is above `safe_at`, or if `top_methods` is zero.
    pub fn validate(&self) -> Result<(), GateError> {
        if self.safe_at > 100 {
            return Err(GateError::Config(format!(
                "safe_at must be at most 100, got {}",
                self.safe_at
            )));
        }
        if self.blocked_below > self.safe_at {
            return Err(GateError::Config(format!(
                "blocked_below ({}) must not exceed safe_at ({})",
                self.blocked_below, self.safe_at
            )));
        }
        if self.top_methods == 0 {
            return Err(GateError::Config(
                "top_methods must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
