// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git object model.
//!
//! ```text
//!        Blob          Tree           Commit        identity wrappers
//!         |             |               |           (oid, lazy data)
//!      .data()       .data()         .data()
//!         v             v               v
//!      BlobData      TreeData       CommitData      content records
//!         |             |               |           (immutable values)
//!      .commit()     .commit()       .commit()
//!         v             v               v
//!    hash-object    mktree -z      commit-tree      via Repository::run
//! ```
//!
//! **`Repository`** owns the wrapper caches and is the only path to git.
//! Wrappers never hold the repository; reads take it as an argument.

pub mod blob;
pub mod cmd;
pub mod commit;
pub mod object;
pub mod person;
pub mod repository;
pub mod tree;

pub use blob::BlobData;
pub use commit::CommitData;
pub use object::{Blob, Commit, GitObject, ObjectKind, Oid, Perm, Tree};
pub use person::{Date, Person, Role};
pub use repository::Repository;
pub use tree::{TreeData, TreeEntry};
