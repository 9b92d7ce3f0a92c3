//! Configuration file parsing for `alarmgrid.toml`.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, PredicateDef};
use crate::error::{SchemaError, SchemaResult};

/// Main configuration structure for `alarmgrid.toml`.
///
/// Omitted catalog keys fall back to the built-in alarm catalog.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// The unfiltered query.
    #[serde(default = "default_base_query")]
    pub base_query: String,

    /// Togglable predicates, in composition order.
    #[serde(default = "default_predicates")]
    pub predicates: Vec<PredicateDef>,

    /// Debug/logging settings.
    #[serde(default)]
    pub debug: DebugConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            base_query: default_base_query(),
            predicates: default_predicates(),
            debug: DebugConfig::default(),
        }
    }
}

fn default_base_query() -> String {
    Catalog::default().base_query
}

fn default_predicates() -> Vec<PredicateDef> {
    Catalog::default().predicates
}

impl GridConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        content.parse()
    }

    /// Build and validate the predicate catalog described by this config.
    pub fn catalog(&self) -> SchemaResult<Catalog> {
        let catalog = Catalog::new(self.base_query.clone(), self.predicates.iter().cloned());
        catalog.validate()?;
        Ok(catalog)
    }
}

impl FromStr for GridConfig {
    type Err = SchemaError;

    /// Parse configuration from a TOML string.
    fn from_str(content: &str) -> SchemaResult<Self> {
        toml::from_str(content).map_err(|e| SchemaError::TomlError { source: e })
    }
}

/// Debug/logging configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebugConfig {
    /// Log every published query at `info` instead of `debug`.
    #[serde(default)]
    pub log_queries: bool,
}
