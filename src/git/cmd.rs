// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git commands that run outside any repository.
//!
//! ```text
//! cmd.rs --> ProcessBuilder --> git clone (progress on the terminal)
//! ```

use std::path::Path;

use crate::config::{CloneConfig, GitConfig};
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::StgResult;

/// A git invocation outside any repository, with prompts configured.
///
/// # Errors
///
/// Returns `ProcessError::ExecutableNotFound` if the configured git is missing.
pub fn git_command(config: &GitConfig) -> StgResult<ProcessBuilder> {
    let builder = ProcessBuilder::which(&config.executable)?.env("GCM_INTERACTIVE", "never");
    Ok(if config.terminal_prompt {
        builder
    } else {
        builder.env("GIT_TERMINAL_PROMPT", "0")
    })
}

/// Clone `url` into `dest`. Progress and errors go straight to the terminal.
///
/// # Errors
///
/// Returns a `ProcessError` if git is missing or the clone fails.
pub fn clone(url: &str, dest: &Path, git: &GitConfig, options: &CloneConfig) -> StgResult<()> {
    let mut builder = git_command(git)?.arg("clone");
    if options.quiet {
        builder = builder.arg("--quiet");
    }
    if options.recurse_submodules {
        builder = builder.arg("--recurse-submodules");
    }
    builder
        .arg(url)
        .arg(dest)
        .flag(ProcessFlags::INHERIT_STDIO)
        .discard_output()
}
