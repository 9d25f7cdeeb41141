//! Layered configuration loader.
//!
//! `defaults/flatrow.default.toml` is embedded into the binary so that docs
//! and runtime behavior stay in sync. Callers layer user-specific files and
//! key overrides on top of those defaults via [`Loader`] before
//! deserializing into [`FlatrowConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::flat::formats::FlatTextFormat;
use crate::flat::mapping::{MapperConfig, RowMapper};
use crate::flat::naming::NamingError;

const DEFAULT_TOML: &str = include_str!("../../defaults/flatrow.default.toml");

/// Top-level configuration for a flatrow run.
#[derive(Debug, Clone, Deserialize)]
pub struct FlatrowConfig {
    pub input: InputConfig,
    pub mapping: MappingConfig,
}

/// Input dialect selection.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub format: FlatTextFormat,
    /// Field delimiter override; the dialect default applies when absent.
    pub delimiter: Option<String>,
}

/// Mirrors the knobs of [`MapperConfig`], plus an optional explicit schema.
#[derive(Debug, Clone, Deserialize)]
pub struct MappingConfig {
    pub list_delimiter: String,
    pub multi_value_delimiters: Option<HashMap<String, String>>,
    pub has_header_row: bool,
    pub max_skip_header_rows: usize,
    /// Explicit column names; empty entries get generated defaults.
    pub columns: Option<Vec<String>>,
}

impl FlatrowConfig {
    /// Build a configured mapper, applying the explicit schema if present.
    pub fn build_mapper(&self) -> Result<RowMapper, NamingError> {
        let tokenizer = self.input.format.tokenizer(self.input.delimiter.as_deref());
        let config = MapperConfig {
            list_delimiter: self.mapping.list_delimiter.clone(),
            multi_value_delimiters: self.mapping.multi_value_delimiters.clone(),
            has_header_row: self.mapping.has_header_row,
            max_skip_header_rows: self.mapping.max_skip_header_rows,
        };
        let mut mapper = RowMapper::new(tokenizer, config);
        if let Some(columns) = &self.mapping.columns {
            mapper.set_column_names(columns.iter().cloned())?;
        }
        Ok(mapper)
    }
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
    pub fn build(self) -> Result<FlatrowConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<FlatrowConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flat::mapping::DEFAULT_LIST_DELIMITER;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.input.format, FlatTextFormat::Csv);
        assert_eq!(config.input.delimiter, None);
        assert_eq!(config.mapping.list_delimiter, DEFAULT_LIST_DELIMITER);
        assert!(!config.mapping.has_header_row);
        assert_eq!(config.mapping.max_skip_header_rows, 0);
        assert_eq!(config.mapping.columns, None);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("input.format", "delimited")
            .expect("override to apply")
            .set_override("mapping.has_header_row", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.input.format, FlatTextFormat::Delimited);
        assert!(config.mapping.has_header_row);
    }

    #[test]
    fn builds_mapper_with_explicit_columns() {
        let config = Loader::new()
            .set_override("mapping.columns", vec!["a".to_string(), String::new()])
            .expect("override to apply")
            .build()
            .expect("config to build");
        let mapper = config.build_mapper().expect("mapper to build");
        assert_eq!(
            mapper.column_names(),
            Some(&["a".to_string(), "column_2".to_string()][..])
        );
    }
}
