// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Patch stack metadata.
//!
//! ```text
//! refs/heads/<branch>  ---------------------.
//!                                           v head
//! refs/stacks/<branch> --> commit "stack initialization"
//!                            tree
//!                              stack.json  {"version":5, "head":..., "applied":[], ...}
//! ```
//!
//! Only creating an empty stack is supported here.

use serde::Serialize;
use tracing::info;

use crate::error::{GitError, StackError, StgResult};
use crate::git::{BlobData, Commit, CommitData, Repository, TreeData};

/// Metadata format written by this version.
pub const METADATA_VERSION: u32 = 5;

/// Name of the metadata file inside the stack tree.
pub const METADATA_FILE: &str = "stack.json";

const INIT_MESSAGE: &str = "stack initialization\n";

/// Contents of `stack.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackMetadata {
    pub version: u32,
    pub prev: Option<String>,
    pub head: String,
    pub applied: Vec<String>,
    pub unapplied: Vec<String>,
    pub hidden: Vec<String>,
}

impl StackMetadata {
    /// Metadata for a stack with no patches on top of `head`.
    #[must_use]
    pub fn empty(head: &Commit) -> Self {
        Self {
            version: METADATA_VERSION,
            prev: None,
            head: head.oid().to_string(),
            applied: Vec::new(),
            unapplied: Vec::new(),
            hidden: Vec::new(),
        }
    }

    /// Serialized form stored in the metadata blob.
    ///
    /// # Errors
    ///
    /// Returns `StackError::Metadata` if serialization fails.
    pub fn to_json(&self) -> StgResult<String> {
        serde_json::to_string(self).map_err(|e| StackError::Metadata(e).into())
    }
}

/// The patch stack of one branch.
pub struct Stack;

impl Stack {
    /// Fully qualified name of the ref holding `branch`'s stack metadata.
    #[must_use]
    pub fn ref_name(branch: &str) -> String {
        format!("refs/stacks/{branch}")
    }

    /// Whether `branch` already carries stack metadata.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Gix` if the reference store cannot be read.
    pub fn is_initialised(repository: &Repository, branch: &str) -> StgResult<bool> {
        repository.ref_exists(&Self::ref_name(branch))
    }

    /// Records an empty stack on `branch` and returns the metadata commit.
    ///
    /// # Errors
    ///
    /// Returns `GitError::BranchNotFound` if `branch` has no commit,
    /// `StackError::AlreadyInitialized` if metadata already exists, or the
    /// failure of writing any object or the ref.
    pub fn initialise(repository: &Repository, branch: &str) -> StgResult<Commit> {
        let head = repository
            .resolve_ref(&format!("refs/heads/{branch}"))?
            .ok_or_else(|| GitError::BranchNotFound {
                branch: branch.to_string(),
            })?;
        if Self::is_initialised(repository, branch)? {
            return Err(StackError::AlreadyInitialized {
                branch: branch.to_string(),
            }
            .into());
        }

        let json = StackMetadata::empty(&head).to_json()?;
        let blob = BlobData::new(json).commit(repository)?;
        let tree = TreeData::new([(METADATA_FILE, blob)])?.commit(repository)?;
        let commit = CommitData::new()
            .set_tree(tree)
            .set_parents(Vec::<Commit>::new())
            .set_message(INIT_MESSAGE)
            .commit(repository)?;

        repository.create_ref(&Self::ref_name(branch), &commit, "initialise")?;
        info!(branch, head = %head.oid(), "initialised stack");
        Ok(commit)
    }
}

#[cfg(test)]
mod tests;
