// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit contents.
//!
//! ```text
//! tree <sha1>                     -> tree
//! parent <sha1>      (0..n)       -> parents, in order
//! author <person>                 -> author
//! committer <person>              -> committer
//! <key> <value>                   ignored
//!  <continuation>                 appended to the previous header
//!
//! <message, verbatim>             -> message
//! ```
//!
//! Every field of [`CommitData`] is a [`Field`]: a record built in memory
//! may leave fields unset and pick them up later from another record with
//! [`CommitData::with_defaults`].

use encoding_rs::Encoding;
use tracing::{debug, trace};

use crate::error::{ObjectError, StgResult};
use crate::value::Field;

use super::object::{Commit, Oid, Tree};
use super::person::{Person, Role};
use super::repository::Repository;

/// The data contents of a git commit object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitData {
    tree: Field<Tree>,
    parents: Field<Vec<Commit>>,
    author: Field<Person>,
    committer: Field<Person>,
    message: Field<String>,
}

impl Default for CommitData {
    fn default() -> Self {
        Self {
            tree: Field::Unset,
            parents: Field::Unset,
            author: Field::Set(Person::author()),
            committer: Field::Set(Person::committer()),
            message: Field::Unset,
        }
    }
}

impl CommitData {
    /// An empty record. Author and committer default to "let git decide".
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn tree(&self) -> &Field<Tree> {
        &self.tree
    }

    #[must_use]
    pub const fn parents(&self) -> &Field<Vec<Commit>> {
        &self.parents
    }

    #[must_use]
    pub const fn author(&self) -> &Field<Person> {
        &self.author
    }

    #[must_use]
    pub const fn committer(&self) -> &Field<Person> {
        &self.committer
    }

    #[must_use]
    pub const fn message(&self) -> &Field<String> {
        &self.message
    }

    #[must_use]
    pub fn set_tree(&self, tree: Tree) -> Self {
        Self {
            tree: Field::Set(tree),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn set_parents(&self, parents: impl IntoIterator<Item = Commit>) -> Self {
        Self {
            parents: Field::Set(parents.into_iter().collect()),
            ..self.clone()
        }
    }

    /// Appends a parent; an unset parent list starts out empty.
    #[must_use]
    pub fn add_parent(&self, parent: Commit) -> Self {
        let mut parents = self.parents.get().cloned().unwrap_or_default();
        parents.push(parent);
        self.set_parents(parents)
    }

    /// Replaces the parents with exactly `parent`.
    #[must_use]
    pub fn set_parent(&self, parent: Commit) -> Self {
        self.set_parents([parent])
    }

    #[must_use]
    pub fn set_author(&self, author: Person) -> Self {
        Self {
            author: Field::Set(author),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn set_committer(&self, committer: Person) -> Self {
        Self {
            committer: Field::Set(committer),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn set_message(&self, message: impl Into<String>) -> Self {
        Self {
            message: Field::Set(message.into()),
            ..self.clone()
        }
    }

    /// Fills every unset field from `defaults`.
    #[must_use]
    pub fn with_defaults(self, defaults: &Self) -> Self {
        Self {
            tree: self.tree.or(defaults.tree.clone()),
            parents: self.parents.or(defaults.parents.clone()),
            author: self.author.or(defaults.author.clone()),
            committer: self.committer.or(defaults.committer.clone()),
            message: self.message.or(defaults.message.clone()),
        }
    }

    /// The single parent.
    ///
    /// # Errors
    ///
    /// Returns `ObjectError::ParentCount` unless there is exactly one parent.
    pub fn parent(&self) -> StgResult<&Commit> {
        match self.parents.get().map(Vec::as_slice) {
            Some([parent]) => Ok(parent),
            other => Err(ObjectError::ParentCount {
                count: other.map_or(0, <[Commit]>::len),
            }
            .into()),
        }
    }

    /// True when this commit has one parent and a tree equal to the
    /// parent's. An unset tree never equals the parent's.
    ///
    /// # Errors
    ///
    /// Returns the failure of reading the parent.
    pub fn is_nochange(&self, repository: &Repository) -> StgResult<bool> {
        let Some([parent]) = self.parents.get().map(Vec::as_slice) else {
            return Ok(false);
        };
        let Some(tree) = self.tree.get() else {
            return Ok(false);
        };
        Ok(parent.data(repository)?.tree.get() == Some(tree))
    }

    /// `GIT_AUTHOR_*` and `GIT_COMMITTER_*` entries for the known identity parts.
    #[must_use]
    pub fn env(&self) -> Vec<(String, String)> {
        let mut vars = Vec::new();
        if let Some(author) = self.author.get() {
            vars.extend(author.env(Role::Author));
        }
        if let Some(committer) = self.committer.get() {
            vars.extend(committer.env(Role::Committer));
        }
        vars
    }

    /// Writes the commit to the object store.
    ///
    /// # Errors
    ///
    /// Returns `ObjectError::UnsetField` if the tree or message is unset, or
    /// the `git commit-tree` failure unchanged.
    pub fn commit(&self, repository: &Repository) -> StgResult<Commit> {
        let tree = self.tree.require("tree")?;
        let message = self.message.require("message")?;

        let mut args = vec!["commit-tree".to_string(), tree.oid().to_string()];
        for parent in self.parents.get().into_iter().flatten() {
            args.push("-p".to_string());
            args.push(parent.oid().to_string());
        }

        let sha1 = repository
            .run(args)
            .envs(self.env())
            .raw_input(message.as_bytes())
            .output_one_line()?;
        let commit = repository.get_commit(&sha1.parse()?);
        debug!(commit = %commit.oid(), tree = %tree.oid(), "stored commit");
        Ok(commit)
    }

    /// Parses the text of a raw commit object.
    ///
    /// # Errors
    ///
    /// Returns `ObjectError::MalformedHeader` for a continuation line with
    /// nothing to continue, and the parse error of any object name or
    /// identity. Header lines without a value are skipped.
    pub fn parse(repository: &Repository, text: &str) -> StgResult<Self> {
        let (header, message) = match text.split_once("\n\n") {
            Some((header, message)) => (header, Field::Set(message.to_string())),
            None => (text, Field::Unset),
        };

        let mut data = Self {
            tree: Field::Unset,
            parents: Field::Unset,
            author: Field::Unset,
            committer: Field::Unset,
            message,
        };
        let mut parents = Vec::new();

        for line in join_continuations(header)? {
            let Some((key, value)) = line.split_once(' ') else {
                trace!(line = %line, "skipping commit header without value");
                continue;
            };
            match key {
                "tree" => data.tree = Field::Set(repository.get_tree(&value.parse()?)),
                "parent" => parents.push(repository.get_commit(&value.parse()?)),
                "author" => data.author = Field::Set(Person::parse(value)?),
                "committer" => data.committer = Field::Set(Person::parse(value)?),
                _ => trace!(key, "skipping commit header"),
            }
        }

        data.parents = Field::Set(parents);
        Ok(data)
    }
}

/// Header lines with continuation lines folded in, joined by newlines.
pub(super) fn join_continuations(header: &str) -> StgResult<Vec<String>> {
    let mut lines: Vec<String> = Vec::new();
    for line in header.split('\n').filter(|line| !line.is_empty()) {
        if let Some(rest) = line.strip_prefix(' ') {
            let previous = lines
                .last_mut()
                .ok_or_else(|| ObjectError::MalformedHeader {
                    line: line.to_string(),
                })?;
            previous.push('\n');
            previous.push_str(rest);
        } else {
            lines.push(line.to_string());
        }
    }
    Ok(lines)
}

/// Decodes a raw commit, honouring its `encoding` header.
fn decode(oid: &Oid, raw: &[u8]) -> StgResult<String> {
    let header_end = raw
        .windows(2)
        .position(|pair| pair == b"\n\n")
        .unwrap_or(raw.len());
    let label = raw[..header_end]
        .split(|&b| b == b'\n')
        .find_map(|line| line.strip_prefix(b"encoding "));

    let undecodable = |encoding: &str| ObjectError::Undecodable {
        oid: oid.to_string(),
        encoding: encoding.to_string(),
    };

    let Some(label) = label else {
        return String::from_utf8(raw.to_vec()).map_err(|_| undecodable("UTF-8").into());
    };
    let encoding = Encoding::for_label(label)
        .ok_or_else(|| undecodable(&String::from_utf8_lossy(label)))?;
    let (text, had_errors) = encoding.decode_without_bom_handling(raw);
    if had_errors {
        return Err(undecodable(encoding.name()).into());
    }
    Ok(text.into_owned())
}

impl Commit {
    /// Contents of this commit, read from git on first use.
    ///
    /// # Errors
    ///
    /// Returns the `git cat-file` failure unchanged, or a decode/parse error.
    pub fn data(&self, repository: &Repository) -> StgResult<&CommitData> {
        let cell = self.handle().cell();
        if let Some(data) = cell.get() {
            return Ok(data);
        }
        let raw = repository.cat_object_bytes(self.oid())?;
        let parsed = CommitData::parse(repository, &decode(self.oid(), &raw)?)?;
        Ok(cell.get_or_init(|| parsed))
    }
}
