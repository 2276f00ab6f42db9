// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Object identities.
//!
//! ```text
//! GitObject = Blob | Tree | Commit
//!               |      |      |
//!               v      v      v
//!            Rc<Handle { oid, OnceCell<*Data> }>
//!
//! identity: (kind, oid)      data: fetched once, on demand
//! ```
//!
//! A wrapper is only a content address plus a memoized data record. Two
//! wrappers with the same address are interchangeable, so equality and
//! hashing never look at the cache.

use std::cell::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::str::FromStr;

use crate::error::{ObjectError, StgError};

use super::blob::BlobData;
use super::commit::CommitData;
use super::tree::TreeData;

/// A 40-character lowercase hex object name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oid(Box<str>);

impl Oid {
    /// Length of a SHA-1 object name in hex digits.
    pub const HEX_LEN: usize = 40;

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Oid {
    type Err = StgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s.len() == Self::HEX_LEN
            && s.bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if valid {
            Ok(Self(s.into()))
        } else {
            Err(ObjectError::InvalidOid {
                value: s.to_string(),
            }
            .into())
        }
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Tree entry file mode, rendered as six octal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Perm(u32);

impl Perm {
    pub const REGULAR: Self = Self(0o100_644);
    pub const EXECUTABLE: Self = Self(0o100_755);
    pub const SYMLINK: Self = Self(0o120_000);
    pub const DIRECTORY: Self = Self(0o040_000);
    pub const GITLINK: Self = Self(0o160_000);

    #[must_use]
    pub const fn mode(self) -> u32 {
        self.0
    }
}

impl FromStr for Perm {
    type Err = StgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ObjectError::InvalidPerm {
            value: s.to_string(),
        };
        if s.len() != 6 || !s.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return Err(invalid().into());
        }
        u32::from_str_radix(s, 8)
            .map(Self)
            .map_err(|_| invalid().into())
    }
}

impl fmt::Display for Perm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06o}", self.0)
    }
}

/// Object type tag as git spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
}

impl ObjectKind {
    #[must_use]
    pub const fn typename(self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
            Self::Commit => "commit",
        }
    }

    /// Mode used when an object is put in a tree without an explicit one.
    #[must_use]
    pub const fn default_perm(self) -> Perm {
        match self {
            Self::Blob => Perm::REGULAR,
            Self::Tree => Perm::DIRECTORY,
            Self::Commit => Perm::GITLINK,
        }
    }
}

impl FromStr for ObjectKind {
    type Err = StgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blob" => Ok(Self::Blob),
            "tree" => Ok(Self::Tree),
            "commit" => Ok(Self::Commit),
            _ => Err(ObjectError::UnknownType {
                typename: s.to_string(),
            }
            .into()),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.typename())
    }
}

/// Shared state behind a wrapper: the address and the lazily filled record.
pub(super) struct Handle<D> {
    oid: Oid,
    data: OnceCell<D>,
}

impl<D> Handle<D> {
    pub(super) const fn oid(&self) -> &Oid {
        &self.oid
    }

    pub(super) const fn cell(&self) -> &OnceCell<D> {
        &self.data
    }
}

/// Defines an identity wrapper: cheap to clone, compared by address only.
macro_rules! object_handle {
    ($(#[$meta:meta])* $name:ident => $data:ty, $kind:expr) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name(Rc<Handle<$data>>);

        impl $name {
            /// Type tag of this wrapper.
            pub const KIND: ObjectKind = $kind;

            pub(super) fn new(oid: Oid) -> Self {
                Self(Rc::new(Handle {
                    oid,
                    data: OnceCell::new(),
                }))
            }

            /// Content address.
            #[must_use]
            pub fn oid(&self) -> &Oid {
                self.0.oid()
            }

            #[must_use]
            pub const fn typename(&self) -> &'static str {
                Self::KIND.typename()
            }

            #[must_use]
            pub const fn default_perm(&self) -> Perm {
                Self::KIND.default_perm()
            }

            /// Whether the data record has already been fetched.
            #[must_use]
            pub fn is_loaded(&self) -> bool {
                self.0.cell().get().is_some()
            }

            pub(super) fn handle(&self) -> &Handle<$data> {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.oid() == other.oid()
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.oid().hash(state);
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}<{}>", stringify!($name), self.oid())
            }
        }

        impl From<$name> for GitObject {
            fn from(object: $name) -> Self {
                Self::$name(object)
            }
        }
    };
}

object_handle!(
    /// A stored byte payload.
    Blob => BlobData, ObjectKind::Blob
);
object_handle!(
    /// A stored directory listing.
    Tree => TreeData, ObjectKind::Tree
);
object_handle!(
    /// A stored snapshot with history.
    Commit => CommitData, ObjectKind::Commit
);

/// Any object that can appear in a tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GitObject {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl GitObject {
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        match self {
            Self::Blob(_) => ObjectKind::Blob,
            Self::Tree(_) => ObjectKind::Tree,
            Self::Commit(_) => ObjectKind::Commit,
        }
    }

    #[must_use]
    pub fn oid(&self) -> &Oid {
        match self {
            Self::Blob(blob) => blob.oid(),
            Self::Tree(tree) => tree.oid(),
            Self::Commit(commit) => commit.oid(),
        }
    }

    #[must_use]
    pub const fn typename(&self) -> &'static str {
        self.kind().typename()
    }

    #[must_use]
    pub const fn default_perm(&self) -> Perm {
        self.kind().default_perm()
    }

    #[must_use]
    pub const fn as_blob(&self) -> Option<&Blob> {
        match self {
            Self::Blob(blob) => Some(blob),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_tree(&self) -> Option<&Tree> {
        match self {
            Self::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_commit(&self) -> Option<&Commit> {
        match self {
            Self::Commit(commit) => Some(commit),
            _ => None,
        }
    }
}
