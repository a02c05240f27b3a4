//! Configuration for the suggestion heuristics

use crate::AdvisorError;
use serde::{Deserialize, Serialize};

/// Thresholds used by the suggestion heuristics
///
/// # Examples
///
/// ```
/// use brandgraph_advisor::AdvisorConfig;
///
/// let config = AdvisorConfig::default();
/// assert_eq!(config.high_coverage_threshold, 75);
/// assert_eq!(config.low_coverage_threshold, 50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Days before a validated entity should be refreshed
    /// Default: 180 (six months)
    pub stale_after_days: u64,

    /// Coverage at which an unvalidated entity deserves a final review
    /// Default: 75
    pub high_coverage_threshold: u8,

    /// Coverage below which a critical entity needs more research
    /// Default: 50
    pub low_coverage_threshold: u8,

    /// Validated entities needed before suggesting the first persona
    /// Default: 3
    pub first_persona_min_validated: usize,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            stale_after_days: 180,
            high_coverage_threshold: 75,
            low_coverage_threshold: 50,
            first_persona_min_validated: 3,
        }
    }
}

impl AdvisorConfig {
    /// Check that the coverage thresholds are in range and ordered
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::Config`] if a threshold exceeds 100 or the
    /// low threshold is above the high one.
    pub fn validate(&self) -> Result<(), AdvisorError> {
        if self.high_coverage_threshold > 100 {
            return Err(AdvisorError::Config(format!(
                "high_coverage_threshold must be at most 100, got {}",
                self.high_coverage_threshold
            )));
        }
        if self.low_coverage_threshold > self.high_coverage_threshold {
            return Err(AdvisorError::Config(format!(
                "low_coverage_threshold ({}) must not exceed high_coverage_threshold ({})",
                self.low_coverage_threshold, self.high_coverage_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_inverted_thresholds() {
        let config = AdvisorConfig {
            low_coverage_threshold: 80,
            high_coverage_threshold: 60,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AdvisorError::Config(_))));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let config = AdvisorConfig {
            high_coverage_threshold: 120,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = AdvisorConfig::default();
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: AdvisorConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }
}
