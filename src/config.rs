//! Engine configuration.

use crate::linkbase::roles;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// What the assembler does when a fragment fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Stop at the first failing fragment.
    #[default]
    FailFast,
    /// Record the error, skip the fragment, keep going.
    Collect,
}

/// How much the calculation validator reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Two verdicts; each check stops at its first failure.
    #[default]
    Summary,
    /// Verdicts plus every offending edge and context.
    Localize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub error_policy: ErrorPolicy,
    pub validation_mode: ValidationMode,
    pub default_link_role: String,
    pub default_bucket_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::default(),
            validation_mode: ValidationMode::default(),
            default_link_role: roles::DEFAULT_LINK_ROLE.to_string(),
            default_bucket_id: "default".to_string(),
        }
    }
}

impl Config {
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }

    pub fn with_default_link_role(mut self, role: impl Into<String>) -> Self {
        self.default_link_role = role.into();
        self
    }

    pub fn with_default_bucket_id(mut self, id: impl Into<String>) -> Self {
        self.default_bucket_id = id.into();
        self
    }

    /// Parses a JSON object; absent keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
