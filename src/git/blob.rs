// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Blob contents.

use tracing::debug;

use crate::error::StgResult;

use super::object::Blob;
use super::repository::Repository;

/// The data contents of a git blob object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobData {
    bytes: Vec<u8>,
}

impl BlobData {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Writes the bytes to the object store.
    ///
    /// # Errors
    ///
    /// Returns the `git hash-object` failure unchanged.
    pub fn commit(&self, repository: &Repository) -> StgResult<Blob> {
        let sha1 = repository
            .run(["hash-object", "-w", "--no-filters", "--stdin"])
            .raw_input(self.bytes.clone())
            .output_one_line()?;
        let blob = repository.get_blob(&sha1.parse()?);
        debug!(blob = %blob.oid(), size = self.bytes.len(), "stored blob");
        Ok(blob)
    }
}

impl Blob {
    /// Contents of this blob, read from git on first use.
    ///
    /// # Errors
    ///
    /// Returns the `git cat-file` failure unchanged.
    pub fn data(&self, repository: &Repository) -> StgResult<&BlobData> {
        let cell = self.handle().cell();
        if let Some(data) = cell.get() {
            return Ok(data);
        }
        let fetched = BlobData::new(repository.cat_object_bytes(self.oid())?);
        Ok(cell.get_or_init(|| fetched))
    }
}
