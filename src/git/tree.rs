// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tree contents.
//!
//! ```text
//! TreeData { name -> (perm, object) }
//!    | commit()                     ^ parse()
//!    v                              |
//! "100644 blob <sha1>\ta.txt\0"  ...  git mktree -z / git ls-tree -z
//! ```

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::{ObjectError, StgResult, bail_out};
use crate::value::FrozenMap;

use super::object::{Blob, Commit, GitObject, Perm, Tree};
use super::repository::Repository;

/// One `git ls-tree` record: perm, type, sha1, tab, name.
const TREE_ENTRY_PATTERN: &str = r"(?s)^([0-7]{6}) ([a-z]+) ([0-9a-f]{40})\t(.*)$";

fn tree_entry_regex() -> StgResult<&'static Regex> {
    static REGEX: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    REGEX
        .get_or_init(|| Regex::new(TREE_ENTRY_PATTERN))
        .as_ref()
        .map_err(|e| bail_out(format!("invalid tree entry pattern: {e}")))
}

/// A tree entry: the object and the mode it is stored with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeEntry {
    perm: Perm,
    object: GitObject,
}

impl TreeEntry {
    #[must_use]
    pub const fn new(perm: Perm, object: GitObject) -> Self {
        Self { perm, object }
    }

    #[must_use]
    pub const fn perm(&self) -> Perm {
        self.perm
    }

    #[must_use]
    pub const fn object(&self) -> &GitObject {
        &self.object
    }
}

/// Bare objects take their kind's default mode; `(perm, object)` pairs keep theirs.
macro_rules! impl_tree_entry_from {
    ($($object:ty),+ $(,)?) => {
        $(
            impl From<$object> for TreeEntry {
                fn from(object: $object) -> Self {
                    let object = GitObject::from(object);
                    Self::new(object.default_perm(), object)
                }
            }

            impl From<(Perm, $object)> for TreeEntry {
                fn from((perm, object): (Perm, $object)) -> Self {
                    Self::new(perm, GitObject::from(object))
                }
            }
        )+
    };
}

impl_tree_entry_from!(GitObject, Blob, Tree, Commit);

/// The data contents of a git tree object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TreeData {
    entries: FrozenMap<String, TreeEntry>,
}

impl TreeData {
    /// Builds a tree from `(name, object)` or `(name, (perm, object))` pairs.
    ///
    /// # Errors
    ///
    /// Returns `ObjectError::SlashInEntryName` if a name contains `/`, and
    /// `ObjectError::DuplicateEntryName` if a name is given twice.
    pub fn new<I, N, E>(entries: I) -> StgResult<Self>
    where
        I: IntoIterator<Item = (N, E)>,
        N: Into<String>,
        E: Into<TreeEntry>,
    {
        let mut checked = Vec::new();
        for (name, entry) in entries {
            let name = name.into();
            if name.contains('/') {
                return Err(ObjectError::SlashInEntryName { name }.into());
            }
            checked.push((name, entry.into()));
        }
        let entries = FrozenMap::try_from_iter(checked)
            .map_err(|name| ObjectError::DuplicateEntryName { name })?;
        Ok(Self { entries })
    }

    #[must_use]
    pub const fn entries(&self) -> &FrozenMap<String, TreeEntry> {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.get(name)
    }

    /// Listing lines in `git mktree` format, in stored order.
    #[must_use]
    pub fn render_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(name, entry)| {
                format!(
                    "{} {} {}\t{name}",
                    entry.perm,
                    entry.object.typename(),
                    entry.object.oid()
                )
            })
            .collect()
    }

    /// Writes the tree to the object store.
    ///
    /// # Errors
    ///
    /// Returns the `git mktree` failure unchanged.
    pub fn commit(&self, repository: &Repository) -> StgResult<Tree> {
        let sha1 = repository
            .run(["mktree", "-z"])
            .input_nulterm(self.render_lines())
            .output_one_line()?;
        let tree = repository.get_tree(&sha1.parse()?);
        debug!(tree = %tree.oid(), entries = self.entries.len(), "stored tree");
        Ok(tree)
    }

    /// Parses `git ls-tree` lines.
    ///
    /// # Errors
    ///
    /// Returns `ObjectError::MalformedTreeEntry` for a line that is not
    /// `<perm> <type> <sha1>\t<name>`; no partial tree is returned.
    pub fn parse<I, S>(repository: &Repository, lines: I) -> StgResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let regex = tree_entry_regex()?;
        let mut entries = Vec::new();
        for line in lines {
            let line = line.as_ref();
            let caps = regex
                .captures(line)
                .ok_or_else(|| ObjectError::MalformedTreeEntry {
                    line: line.to_string(),
                })?;
            let perm: Perm = caps[1].parse()?;
            let object = repository.get_object(&caps[2], &caps[3].parse()?)?;
            entries.push((caps[4].to_string(), TreeEntry::new(perm, object)));
        }
        Self::new(entries)
    }
}

impl Tree {
    /// Immediate children of this tree, listed by git on first use.
    ///
    /// # Errors
    ///
    /// Returns the `git ls-tree` failure unchanged, or a parse error.
    pub fn data(&self, repository: &Repository) -> StgResult<&TreeData> {
        let cell = self.handle().cell();
        if let Some(data) = cell.get() {
            return Ok(data);
        }
        let lines = repository
            .run(["ls-tree", "-z", self.oid().as_str()])
            .output_lines('\0')?;
        let parsed = TreeData::parse(repository, lines)?;
        Ok(cell.get_or_init(|| parsed))
    }
}
