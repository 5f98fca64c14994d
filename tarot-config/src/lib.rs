//! Shared configuration loader for the tarot toolchain.
//!
//! `defaults/tarot.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`TarotConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use tarot_babel::formats::SheetNames;

const DEFAULT_TOML: &str = include_str!("../defaults/tarot.default.toml");

/// Top-level configuration consumed by tarot applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TarotConfig {
    pub sheets: SheetsConfig,
    pub convert: ConvertConfig,
}

/// Sheet names of the workbook container, overridable for localized decks.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    pub main: String,
    pub element_coords: String,
    pub element_details: String,
    pub meanings: String,
    pub scenarios: String,
}

impl From<SheetsConfig> for SheetNames {
    fn from(config: SheetsConfig) -> Self {
        SheetNames {
            main: config.main,
            element_coords: config.element_coords,
            element_details: config.element_details,
            meanings: config.meanings,
            scenarios: config.scenarios,
        }
    }
}

impl From<&SheetsConfig> for SheetNames {
    fn from(config: &SheetsConfig) -> Self {
        SheetNames {
            main: config.main.clone(),
            element_coords: config.element_coords.clone(),
            element_details: config.element_details.clone(),
            meanings: config.meanings.clone(),
            scenarios: config.scenarios.clone(),
        }
    }
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub json: JsonConfig,
    pub workbook: WorkbookConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonConfig {
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkbookConfig {
    pub write_constraints: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<TarotConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TarotConfig, ConfigError> {
    Loader::new().build()
}
