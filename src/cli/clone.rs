// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `clone` command arguments.

use clap::Args;
use std::path::PathBuf;

/// Clone a git repository into <dir> and initialise a stack on its checked
/// out branch. <dir> is created and must not already exist.
#[derive(Debug, Clone, Args)]
pub struct CloneArgs {
    /// Repository to clone (URL or path).
    #[arg(value_name = "REPOSITORY")]
    pub repository: String,

    /// Directory to create.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Suppress git's progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Also clone submodules.
    #[arg(long)]
    pub recurse_submodules: bool,
}

impl CloneArgs {
    /// `clone.*` configuration overrides for the flags that were given.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        let mut overrides = Vec::new();
        if self.quiet {
            overrides.push(("clone.quiet", true.into()));
        }
        if self.recurse_submodules {
            overrides.push(("clone.recurse_submodules", true.into()));
        }
        overrides
    }
}
