//! Shared configuration loader for the rmd toolchain.
//!
//! `defaults/rmd.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`RmdConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/rmd.default.toml");

/// Name of the optional per-project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "rmd.toml";

/// Top-level configuration consumed by rmd applications.
#[derive(Debug, Clone, Deserialize)]
pub struct RmdConfig {
    pub convert: ConvertConfig,
    pub notebook: NotebookConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub to: String,
    pub execute: bool,
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub template: String,
    pub view: bool,
}

impl HtmlConfig {
    /// The configured template, `None` when left empty.
    pub fn template(&self) -> Option<&str> {
        Some(self.template.as_str()).filter(|t| !t.is_empty())
    }
}

/// Knobs for the notebook envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct NotebookConfig {
    pub collapse_single_kernel: bool,
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
    pub fn build(self) -> Result<RmdConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<RmdConfig, ConfigError> {
    Loader::new().build()
}
