// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for stg-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. stg.toml (cwd, optional)
//! 3. --config (repeatable)
//! 4. STG_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! STG_GLOBAL__LOG_LEVEL=4          → global.log_level = 4
//! STG_GIT__EXECUTABLE=/usr/bin/git → git.executable = "/usr/bin/git"
//! STG_CLONE__QUIET=true            → clone.quiet = true
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::StgResult;

pub use loader::{ConfigLoader, ConfigSource};
pub use types::{CloneConfig, GitConfig, GlobalConfig};

/// Name of the optional per-directory config file.
pub const LOCAL_CONFIG_FILE: &str = "stg.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "STG";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logging options.
    pub global: GlobalConfig,
    /// Git executable options.
    pub git: GitConfig,
    /// `stg clone` options.
    pub clone: CloneConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stg_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("stg.toml")
    ///     .with_env_prefix("STG")
    ///     .build()?;
    /// # Ok::<(), stg_rs::error::StgError>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// The standard layers: `stg.toml` in `cwd` if present, then each of
    /// `extra_files` in order, then `STG_*` variables.
    #[must_use]
    pub fn loader(cwd: &Path, extra_files: &[PathBuf]) -> ConfigLoader {
        let mut loader = Self::builder().add_toml_file_optional(cwd.join(LOCAL_CONFIG_FILE));
        for path in extra_files {
            loader = loader.add_toml_file(path);
        }
        loader.with_env_prefix(ENV_PREFIX)
    }

    /// Loads the standard layers without overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an `extra_files` entry is missing, a file is not
    /// valid TOML, or a value has the wrong type.
    pub fn load(cwd: &Path, extra_files: &[PathBuf]) -> StgResult<Self> {
        Self::loader(cwd, extra_files).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> StgResult<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Format configuration options for display, one `key = value` per line,
    /// sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert(
            "global.log_level",
            self.global.log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        if let Some(path) = &self.global.log_file {
            options.insert("global.log_file", path.display().to_string());
        }
        options.insert("git.executable", self.git.executable.clone());
        options.insert(
            "git.terminal_prompt",
            self.git.terminal_prompt.to_string(),
        );
        options.insert("clone.quiet", self.clone.quiet.to_string());
        options.insert(
            "clone.recurse_submodules",
            self.clone.recurse_submodules.to_string(),
        );

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
