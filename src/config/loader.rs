// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional()   stg.toml
//!   .add_toml_file()            --config FILE
//!   .add_toml_str()             inline text
//!   .with_env_prefix()          STG_SECTION__KEY
//!   .set()                      command-line flags
//!        |
//!        v
//!    build() --> Config
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};

use super::Config;
use crate::error::{ConfigError, StgResult};

/// One file-like layer, in the order it was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config FILE`: must exist.
    File(PathBuf),
    /// `stg.toml`: only listed when it exists.
    Optional(PathBuf),
    Inline,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Optional(path) => write!(f, "{} (optional)", path.display()),
            Self::Inline => f.write_str("<inline>"),
        }
    }
}

/// Collects layers; later layers win.
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        self
    }

    /// Adds a TOML file that [`build`](Self::build) fails on if missing.
    #[must_use]
    pub fn add_toml_file(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut loader = self.add_file(path, true);
        loader.sources.push(ConfigSource::File(path.to_path_buf()));
        loader
    }

    #[must_use]
    pub fn add_toml_file_optional(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut loader = self.add_file(path, false);
        if path.is_file() {
            loader.sources.push(ConfigSource::Optional(path.to_path_buf()));
        }
        loader
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    /// Reads `PREFIX_SECTION__KEY` variables, e.g. `STG_GIT__EXECUTABLE`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets `key` (dotted, e.g. `clone.quiet`) above every other layer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Override` if `key` is not a valid path.
    pub fn set(mut self, key: &str, value: impl Into<config::Value>) -> StgResult<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|source| ConfigError::Override {
                key: key.to_string(),
                source,
            })?;
        Ok(self)
    }

    /// Merges all layers into a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a required file is missing or a file is
    /// not TOML, and `ConfigError::Invalid` if the merged values have the
    /// wrong type or name an unknown section or key.
    pub fn build(self) -> StgResult<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let merged = builder.build().map_err(ConfigError::Load)?;
        Ok(merged.try_deserialize().map_err(ConfigError::Invalid)?)
    }

    #[must_use]
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Numbered source list for `stg configs`.
    #[must_use]
    pub fn format_sources(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| format!("{}. {source}", i + 1))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
