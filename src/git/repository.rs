// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The repository handle: the one place objects are read from and written to.
//!
//! ```text
//!               Repository
//!    gix (read-only, in process)    git CLI (everything else)
//!    .discover                      .run(args) -> ProcessBuilder
//!    .current_branch                .cat_object / .cat_object_bytes
//!    .ref_exists                    .resolve_ref / .create_ref
//!
//!    object caches: oid -> Blob | Tree | Commit (one wrapper per address)
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::GitConfig;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::{GitError, GixError, ProcessError, StgResult};

use super::object::{Blob, Commit, GitObject, ObjectKind, Oid, Tree};

/// An opened git repository.
///
/// Wrappers handed out by [`get_blob`](Self::get_blob) and friends are cached
/// per address, so asking twice for the same object yields the same wrapper
/// and its data is read from git at most once.
pub struct Repository {
    inner: gix::Repository,
    workdir: PathBuf,
    git: PathBuf,
    terminal_prompt: bool,
    blobs: RefCell<HashMap<Oid, Blob>>,
    trees: RefCell<HashMap<Oid, Tree>>,
    commits: RefCell<HashMap<Oid, Commit>>,
}

impl Repository {
    /// Opens the repository containing `path` with default git settings.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Gix` if no repository is found, or
    /// `ProcessError::ExecutableNotFound` if git is not on `PATH`.
    pub fn discover(path: &Path) -> StgResult<Self> {
        Self::discover_with(path, &GitConfig::default())
    }

    /// Opens the repository containing `path`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Gix` if no repository is found, or
    /// `ProcessError::ExecutableNotFound` if the configured git is missing.
    pub fn discover_with(path: &Path, config: &GitConfig) -> StgResult<Self> {
        let inner =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let workdir = inner.workdir().unwrap_or_else(|| inner.git_dir());
        let workdir = std::path::absolute(workdir)?;
        let git = ProcessBuilder::find(&config.executable).ok_or_else(|| {
            ProcessError::ExecutableNotFound {
                name: config.executable.clone(),
            }
        })?;
        debug!(workdir = %workdir.display(), git = %git.display(), "opened repository");

        Ok(Self {
            inner,
            workdir,
            git,
            terminal_prompt: config.terminal_prompt,
            blobs: RefCell::default(),
            trees: RefCell::default(),
            commits: RefCell::default(),
        })
    }

    /// Work tree root, or the git directory of a bare repository.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    #[must_use]
    pub fn git_dir(&self) -> &Path {
        self.inner.git_dir()
    }

    /// A git invocation running in this repository. Nothing runs until one
    /// of the builder's `output_*` methods is called.
    pub fn run<I, S>(&self, args: I) -> ProcessBuilder
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let builder = ProcessBuilder::new(&self.git)
            .args(args)
            .cwd(&self.workdir)
            .env("GCM_INTERACTIVE", "never");
        if self.terminal_prompt {
            builder
        } else {
            builder.env("GIT_TERMINAL_PROMPT", "0")
        }
    }

    /// Pretty-printed object contents as text.
    ///
    /// # Errors
    ///
    /// Returns the `git cat-file` failure, or `ProcessError::UnexpectedOutput`
    /// if the contents are not UTF-8.
    pub fn cat_object(&self, oid: &Oid) -> StgResult<String> {
        self.run(["cat-file", "-p", oid.as_str()]).output_text()
    }

    /// Object contents as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns the `git cat-file` failure unchanged.
    pub fn cat_object_bytes(&self, oid: &Oid) -> StgResult<Vec<u8>> {
        self.run(["cat-file", "-p", oid.as_str()]).output_bytes()
    }

    pub fn get_blob(&self, oid: &Oid) -> Blob {
        self.blobs
            .borrow_mut()
            .entry(oid.clone())
            .or_insert_with(|| Blob::new(oid.clone()))
            .clone()
    }

    pub fn get_tree(&self, oid: &Oid) -> Tree {
        self.trees
            .borrow_mut()
            .entry(oid.clone())
            .or_insert_with(|| Tree::new(oid.clone()))
            .clone()
    }

    pub fn get_commit(&self, oid: &Oid) -> Commit {
        self.commits
            .borrow_mut()
            .entry(oid.clone())
            .or_insert_with(|| Commit::new(oid.clone()))
            .clone()
    }

    /// The wrapper for `oid`, chosen by git's type tag.
    ///
    /// # Errors
    ///
    /// Returns `ObjectError::UnknownType` for a tag other than `blob`,
    /// `tree` or `commit`.
    pub fn get_object(&self, typename: &str, oid: &Oid) -> StgResult<GitObject> {
        Ok(match typename.parse()? {
            ObjectKind::Blob => self.get_blob(oid).into(),
            ObjectKind::Tree => self.get_tree(oid).into(),
            ObjectKind::Commit => self.get_commit(oid).into(),
        })
    }

    /// Short name of the checked-out branch; `None` if HEAD is detached.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Gix` if HEAD cannot be read.
    pub fn current_branch(&self) -> StgResult<Option<String>> {
        let head = self
            .inner
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    /// Whether the fully qualified reference `name` exists.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Gix` if the reference store cannot be read.
    pub fn ref_exists(&self, name: &str) -> StgResult<bool> {
        match self.inner.find_reference(name) {
            Ok(_) => Ok(true),
            Err(gix::reference::find::existing::Error::NotFound { name: _ }) => Ok(false),
            Err(e) => Err(GitError::Gix(GixError::Reference(e)).into()),
        }
    }

    /// The commit `name` points at, or `None` if it does not resolve to one.
    ///
    /// # Errors
    ///
    /// Returns a spawn failure or an invalid object name from git.
    pub fn resolve_ref(&self, name: &str) -> StgResult<Option<Commit>> {
        let revision = format!("{name}^{{commit}}");
        let output = self
            .run(["rev-parse", "--verify", "--quiet", revision.as_str()])
            .flag(ProcessFlags::ALLOW_FAILURE)
            .run()?;
        if !output.success() {
            return Ok(None);
        }
        let sha1 = String::from_utf8_lossy(output.stdout());
        Ok(Some(self.get_commit(&sha1.trim().parse()?)))
    }

    /// Creates `name` pointing at `commit`. Fails if `name` already exists.
    ///
    /// # Errors
    ///
    /// Returns the `git update-ref` failure unchanged.
    pub fn create_ref(&self, name: &str, commit: &Commit, message: &str) -> StgResult<()> {
        self.run(["update-ref", "-m", message, name, commit.oid().as_str(), ""])
            .discard_output()?;
        debug!(reference = name, commit = %commit.oid(), "created reference");
        Ok(())
    }
}
