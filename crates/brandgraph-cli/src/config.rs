//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use brandgraph_advisor::AdvisorConfig;
use brandgraph_auditor::AuditConfig;
use brandgraph_domain::AnchorRules;
use brandgraph_gatekeeper::GateConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Consistency check thresholds
    #[serde(default)]
    pub audit: AuditConfig,

    /// Suggestion thresholds
    #[serde(default)]
    pub advisor: AdvisorConfig,

    /// Decision gate thresholds
    #[serde(default)]
    pub gate: GateConfig,

    /// Anchor roles used by the rule scans and suggestions
    #[serde(default)]
    pub anchors: AnchorRules,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Dismissal database (defaults to `~/.brandgraph/dismissals.db`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissal_db: Option<PathBuf>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the config file and the dismissal database.
    pub fn home() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".brandgraph"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::home()?.join("config.toml"))
    }

    /// Load configuration from `path`, or the default location.
    ///
    /// A missing file yields the defaults. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::path()?,
        };

        let config = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            toml::from_str(&contents)?
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.audit.validate()?;
        self.advisor.validate()?;
        self.gate.validate()?;
        Ok(())
    }

    /// Resolve the dismissal database location.
    pub fn dismissal_db(&self) -> Result<PathBuf> {
        match &self.settings.dismissal_db {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::home()?.join("dismissals.db")),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            dismissal_db: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.gate.safe_at, 80);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.audit.stale_after_days, 180);
    }

    #[test]
    fn test_partial_sections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[settings]\nformat = \"json\"\n\n[gate]\nsafe_at = 70\n\n[audit]\nstale_after_days = 90\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert_eq!(config.gate.safe_at, 70);
        assert_eq!(config.gate.blocked_below, 50);
        assert_eq!(config.audit.stale_after_days, 90);
        assert_eq!(config.advisor.high_coverage_threshold, 75);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[gate]\nblocked_below = 90\nsafe_at = 80\n").unwrap();

        assert!(matches!(Config::load(Some(&path)), Err(CliError::Gate(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.settings.color = false;
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert!(!loaded.settings.color);
        assert_eq!(loaded.anchors, AnchorRules::default());
    }
}
