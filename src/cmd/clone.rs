// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `stg clone`: clone a repository and initialise a stack on its branch.
//!
//! ```text
//! <dir> exists? --yes--> error, nothing run
//!      | no
//!      v
//! git clone <repository> <dir>
//!      v
//! cd <dir>
//!      v
//! open ".", current branch --detached--> error
//!      v
//! Stack::initialise
//! ```

use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::cli::clone::CloneArgs;
use crate::config::Config;
use crate::error::{CommandError, GitError, Result, StgError};
use crate::git::{Repository, cmd};
use crate::stack::Stack;

/// Run the clone command.
///
/// # Errors
///
/// Returns an error if the target directory already exists, the clone
/// fails, the clone has a detached HEAD, or the stack cannot be initialised.
pub fn run_clone_command(args: &CloneArgs, config: &Config) -> Result<()> {
    let dir = &args.dir;
    if dir.symlink_metadata().is_ok() {
        return Err(StgError::from(CommandError::TargetExists {
            path: dir.display().to_string(),
        })
        .into());
    }

    cmd::clone(&args.repository, dir, &config.git, &config.clone)?;

    std::env::set_current_dir(dir)
        .with_context(|| format!("failed to enter {}", dir.display()))?;
    let cwd = std::env::current_dir()?;
    info!(cwd = %cwd.display(), "entered clone");

    let repository = Repository::discover_with(Path::new("."), &config.git)?;
    let branch = repository
        .current_branch()?
        .ok_or_else(|| {
            StgError::from(GitError::DetachedHead {
                path: dir.display().to_string(),
            })
        })?;
    Stack::initialise(&repository, &branch)?;

    info!(repository = %args.repository, dir = %dir.display(), branch = %branch, "cloned");
    Ok(())
}
