//! file: core/src/config.rs
//! description: compilation options shared by the session and the CLI.
//!
use std::path::Path;

use serde::Deserialize;

use crate::error::{Level, ShowcErrorExt};
use crate::location::Location;

/// Options controlling optimization and IR emission.
///
/// Deserializes from JSON; missing fields take their defaults, so
/// `{"optimize": false}` is a complete configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Run dead-temporary elimination on generated TAC.
    pub optimize: bool,
    /// Append a `system("pause")` call before `main` returns.
    pub pause_on_exit: bool,
    /// Name recorded in the emitted IR module.
    pub module_name: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions { optimize: true, pause_on_exit: false, module_name: "showc".to_string() }
    }
}

impl CompileOptions {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError { path: None, reason: e.to_string() })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError {
            path: Some(path.display().to_string()),
            reason: e.to_string(),
        })?;
        Self::from_json(&text).map_err(|mut e| {
            e.path = Some(path.display().to_string());
            e
        })
    }
}

#[derive(Debug, Clone)]
pub struct ConfigError {
    pub path: Option<String>,
    pub reason: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ConfigError {}

impl ShowcErrorExt for ConfigError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        match &self.path {
            Some(path) => format!("invalid configuration '{}': {}", path, self.reason),
            None => format!("invalid configuration: {}", self.reason),
        }
    }

    fn issuer(&self) -> String {
        "showc.config".to_string()
    }

    fn location(&self) -> Option<Location> {
        None
    }
}
