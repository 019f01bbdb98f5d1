//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the period
//! table and the forfait rule templates from YAML files.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::forfait::RuleTemplate;

use super::types::{EngineConfig, PeriodTable};

/// Templates configuration file structure.
#[derive(Debug, Clone, Deserialize)]
struct TemplatesFile {
    /// The template catalog.
    templates: Vec<RuleTemplate>,
}

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/nl-loonheffing/
/// ├── period_table.yaml       # Periods-per-year table
/// └── forfait_templates.yaml  # Predefined forfait rule templates
/// ```
///
/// # Example
///
/// ```no_run
/// use loon_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/nl-loonheffing").unwrap();
/// let table = &loader.config().period_table;
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] when a required file is
    /// missing and [`EngineError::ConfigParseError`] when a file contains
    /// invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let table_path = path.join("period_table.yaml");
        let period_table = Self::load_yaml::<PeriodTable>(&table_path)?;

        let templates_path = path.join("forfait_templates.yaml");
        let templates_file = Self::load_yaml::<TemplatesFile>(&templates_path)?;

        Ok(Self {
            config: EngineConfig {
                period_table,
                templates: templates_file.templates,
            },
        })
    }

    /// Returns a loader carrying the built-in configuration, without
    /// touching the filesystem.
    pub fn builtin() -> Self {
        Self {
            config: EngineConfig::builtin(),
        }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}
