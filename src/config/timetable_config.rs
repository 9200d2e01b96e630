//! Timetable Configuration - engine defaults as operator-tunable TOML values
//!
//! Each struct implements `Default` with the built-in behaviour, so a
//! missing config file changes nothing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults::{
    COLLABORATOR_TIMEOUT_MS, CONFIG_ENV_VAR, CONFIG_FILE_NAME, DEFAULT_TRANSACTION_TYPE,
    MAX_VETTING_DAYS,
};
use crate::calendar::BusinessDayOptions;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for the timetable engine.
///
/// Load with `TimetableConfig::load()` which searches:
/// 1. `$HKEX_TIMETABLE_CONFIG` env var
/// 2. `./timetable.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableConfig {
    /// Business-day rules used to realize offsets
    #[serde(default)]
    pub calendar: BusinessDayOptions,

    /// Generation defaults
    #[serde(default)]
    pub timetable: GenerationConfig,

    /// External collaborator guards
    #[serde(default)]
    pub collaborators: CollaboratorConfig,

    /// Static vetting rules, first keyword match wins
    #[serde(default)]
    pub vetting: Vec<VettingRule>,
}

impl TimetableConfig {
    /// Load configuration using the standard search order:
    /// 1. `$HKEX_TIMETABLE_CONFIG` environment variable
    /// 2. `./timetable.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded timetable config from {CONFIG_ENV_VAR}");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {CONFIG_ENV_VAR}, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_ENV_VAR} points to non-existent file, falling back");
            }
        }

        // 2. Check ./timetable.toml
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded timetable config from ./{CONFIG_FILE_NAME}");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{CONFIG_FILE_NAME}, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No {CONFIG_FILE_NAME} found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::parse(&contents, &path.display().to_string())
    }

    /// Parse from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents, "<inline>")
    }

    fn parse(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        for w in super::validation::validate_unknown_keys(contents) {
            warn!(origin, "{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(origin.to_string(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Write to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Saved timetable config");
        Ok(())
    }

    /// Validate for internal consistency.
    ///
    /// Rules:
    /// - Collaborator timeout must be > 0
    /// - Default transaction type must not be blank
    /// - Vetting rules need a keyword and a headline category, and at most
    ///   `MAX_VETTING_DAYS` days
    /// - Custom holidays must be unique
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if self.collaborators.timeout_ms == 0 {
            errors.push("collaborators.timeout_ms must be > 0".to_string());
        }

        if self.timetable.default_transaction_type.trim().is_empty() {
            errors.push("timetable.default_transaction_type must not be empty".to_string());
        }

        for (i, rule) in self.vetting.iter().enumerate() {
            if rule.keyword.trim().is_empty() {
                errors.push(format!("vetting[{i}].keyword must not be empty"));
            }
            if rule.headline_category.trim().is_empty() {
                errors.push(format!("vetting[{i}].headline_category must not be empty"));
            }
            if rule.vetting_days > MAX_VETTING_DAYS {
                errors.push(format!(
                    "vetting[{i}].vetting_days = {} exceeds {MAX_VETTING_DAYS}",
                    rule.vetting_days
                ));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for date in &self.calendar.custom_holidays {
            if !seen.insert(date) {
                errors.push(format!("calendar.custom_holidays lists {date} more than once"));
            }
        }

        for w in super::validation::validate_calendar_sanity(self) {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({0}): {1}")]
    Parse(String, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Sections
// ============================================================================

/// `[timetable]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Realize offsets as business days (false: calendar days)
    pub adjust_for_holidays: bool,

    /// Generate the approval-required scenario for rights issues and open
    /// offers unless the request says otherwise
    pub require_shareholder_approval: bool,

    /// Substituted for an empty transaction type
    pub default_transaction_type: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            adjust_for_holidays: true,
            require_shareholder_approval: true,
            default_transaction_type: DEFAULT_TRANSACTION_TYPE.to_string(),
        }
    }
}

/// `[collaborators]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollaboratorConfig {
    /// Upper bound on each vetting / reference lookup (ms)
    pub timeout_ms: u64,
}

impl Default for CollaboratorConfig {
    fn default() -> Self {
        Self {
            timeout_ms: COLLABORATOR_TIMEOUT_MS,
        }
    }
}

impl CollaboratorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// One `[[vetting]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VettingRule {
    /// Phrase matched against the normalized transaction type
    pub keyword: String,
    pub vetting_days: u32,
    pub headline_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_reference: Option<String>,
}
