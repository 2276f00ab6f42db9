// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `stg init`: initialise an empty stack on the current branch.

use std::path::Path;

use crate::config::Config;
use crate::error::{GitError, Result, StgError};
use crate::git::Repository;
use crate::stack::Stack;

/// Run the init command for the repository containing `cwd`.
///
/// # Errors
///
/// Returns an error if no repository contains `cwd`, HEAD is detached, or
/// the branch already has a stack.
pub fn run_init_command(cwd: &Path, config: &Config) -> Result<()> {
    let repository = Repository::discover_with(cwd, &config.git)?;
    let branch = repository.current_branch()?.ok_or_else(|| {
        StgError::from(GitError::DetachedHead {
            path: repository.workdir().display().to_string(),
        })
    })?;
    Stack::initialise(&repository, &branch)?;
    Ok(())
}
