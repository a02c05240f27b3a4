//! Configuration for consistency checks
//!
//! Defines the time windows, keyword extraction limits and check interval.

use crate::AuditError;
use brandgraph_domain::clock::{SECONDS_PER_DAY, SECONDS_PER_HOUR};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the consistency checker
///
/// # Examples
///
/// ```
/// use brandgraph_auditor::AuditConfig;
///
/// // Default configuration: six months until an entity counts as stale
/// let config = AuditConfig::default();
/// assert_eq!(config.stale_after_days, 180);
///
/// // Strict: flags staleness after three months
/// let config = AuditConfig::strict();
/// assert_eq!(config.stale_after_days, 90);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Days without an update before a connected entity is stale
    /// Default: 180 (six months)
    pub stale_after_days: u64,

    /// Window for the "recently updated" summary (in hours)
    /// Default: 24
    pub recent_window_hours: u64,

    /// Shortest token kept as a keyword
    /// Default: 5 characters
    pub min_keyword_len: usize,

    /// Keywords taken from each side of the keyword-gap scan
    /// Default: 10
    pub max_keywords: usize,

    /// Missing keywords tolerated before a gap is reported
    /// Default: 2
    pub keyword_gap_threshold: usize,

    /// Entries kept in the "recently updated" summary
    /// Default: 5
    pub recently_updated_limit: usize,

    /// How often the background worker runs a check (in minutes)
    /// Default: 60
    pub check_interval_minutes: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            stale_after_days: 180,
            recent_window_hours: 24,
            min_keyword_len: 5,
            max_keywords: 10,
            keyword_gap_threshold: 2,
            recently_updated_limit: 5,
            check_interval_minutes: 60,
        }
    }
}

impl AuditConfig {
    /// Strict configuration: shorter staleness window, tighter keyword gap
    ///
    /// - Stale after: 90 days
    /// - Keyword gap threshold: 1
    /// - Check interval: 30 minutes
    pub fn strict() -> Self {
        Self {
            stale_after_days: 90,
            keyword_gap_threshold: 1,
            check_interval_minutes: 30,
            ..Self::default()
        }
    }

    /// Reject settings that would make a scan meaningless
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Config`] for a zero check interval or a zero
    /// keyword limit.
    pub fn validate(&self) -> Result<(), AuditError> {
        if self.check_interval_minutes == 0 {
            return Err(AuditError::Config(
                "check_interval_minutes must be at least 1".to_string(),
            ));
        }
        if self.max_keywords == 0 {
            return Err(AuditError::Config(
                "max_keywords must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get check interval as Duration
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_minutes * 60)
    }

    /// Staleness window in seconds
    pub fn stale_after_secs(&self) -> u64 {
        self.stale_after_days.saturating_mul(SECONDS_PER_DAY)
    }

    /// Recent-update window in seconds
    pub fn recent_window_secs(&self) -> u64 {
        self.recent_window_hours.saturating_mul(SECONDS_PER_HOUR)
    }
}
