//! Session configuration loaded from YAML.

use crate::command::DEFAULT_HISTORY_LIMIT;
use crate::logging::{normalize_level, LoggingError};
use crate::sort::SortStrategy;
use crate::source::DEFAULT_CATEGORY;
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(#[from] LoggingError),

    #[error("history_limit must be at least 1")]
    InvalidHistoryLimit,
}

/// Settings for a [`crate::session::RecipeSession`].
///
/// Every key is optional:
///
/// ```yaml
/// current_user: alice
/// sort_strategy: by_preparation_time
/// history_limit: 50
/// default_category: General
/// log_level: debug
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookConfig {
    /// User whose permissions apply to proxied reads and who owns new recipes.
    pub current_user: String,
    pub sort_strategy: SortStrategy,
    /// Maximum number of undo steps.
    pub history_limit: usize,
    /// Category given to drafted recipes that leave it blank.
    pub default_category: String,
    pub log_level: String,
}

impl Default for BookConfig {
    fn default() -> Self {
        BookConfig {
            current_user: "guest".to_string(),
            sort_strategy: SortStrategy::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            default_category: DEFAULT_CATEGORY.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl BookConfig {
    /// Parses and validates a YAML document. An empty document yields the
    /// defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config = if yaml.trim().is_empty() {
            BookConfig::default()
        } else {
            serde_yaml::from_str::<BookConfig>(yaml)?
        };
        config.validated()
    }

    pub fn from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        self.log_level = normalize_level(&self.log_level)?.to_string();
        if self.history_limit == 0 {
            return Err(ConfigError::InvalidHistoryLimit);
        }
        Ok(self)
    }
}
