// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Immutable building blocks for content records.
//!
//! ```text
//! Field<T>         Unset | Set(T)
//!                  "not specified" is distinct from "specified as empty"
//!
//! FrozenMap<K, V>  insertion-ordered, no mutation after construction
//!                  map equality (order-insensitive), matching Hash
//! ```

use std::borrow::Borrow;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::error::{ObjectError, StgResult};

/// A record field that may not have been specified yet.
///
/// `Field::Set(Vec::new())` and `Field::Unset` are different states: the
/// former says "explicitly no parents", the latter "take it from elsewhere".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Field<T> {
    /// Never specified.
    #[default]
    Unset,
    /// Specified, possibly as an empty value.
    Set(T),
}

impl<T> Field<T> {
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns the value if set.
    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset => None,
        }
    }

    /// Converts into an `Option`, forgetting the field-ness.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset => None,
        }
    }

    /// Keeps `self` if set, otherwise falls back to `default`.
    #[must_use]
    pub fn or(self, default: Self) -> Self {
        match self {
            Self::Set(_) => self,
            Self::Unset => default,
        }
    }

    /// Returns the value, or an `UnsetField` error naming `field`.
    ///
    /// # Errors
    ///
    /// Returns `ObjectError::UnsetField` if the field is unset.
    pub fn require(&self, field: &'static str) -> StgResult<&T> {
        self.get()
            .ok_or_else(|| ObjectError::UnsetField { field }.into())
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Self::Set(value)
    }
}

/// An insertion-ordered map that cannot be changed once built.
///
/// Cloning is cheap (the entries are shared). Equality ignores order, so two
/// maps with the same pairs compare equal however they were built.
#[derive(Debug)]
pub struct FrozenMap<K, V> {
    entries: Rc<[(K, V)]>,
}

impl<K, V> FrozenMap<K, V> {
    /// Builds a map from pairs whose keys are already known to be unique.
    ///
    /// # Errors
    ///
    /// Returns the first key that appears twice.
    pub fn try_from_iter<I>(iter: I) -> Result<Self, K>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Eq,
    {
        let mut entries: Vec<(K, V)> = Vec::new();
        for (key, value) in iter {
            if entries.iter().any(|(k, _)| *k == key) {
                return Err(key);
            }
            entries.push((key, value));
        }
        Ok(Self {
            entries: entries.into(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a value by key.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entries
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Iterates over the pairs in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> {
        self.entries.iter().map(entry_refs)
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl<K, V> Clone for FrozenMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<K, V> Default for FrozenMap<K, V> {
    fn default() -> Self {
        Self {
            entries: Rc::from(Vec::new()),
        }
    }
}

impl<K: Eq, V: PartialEq> PartialEq for FrozenMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}

impl<K: Eq, V: Eq> Eq for FrozenMap<K, V> {}

impl<K: Hash, V: Hash> Hash for FrozenMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent combination keeps Hash consistent with PartialEq.
        let combined = self.entries.iter().fold(0u64, |acc, entry| {
            let mut hasher = DefaultHasher::new();
            entry.hash(&mut hasher);
            acc.wrapping_add(hasher.finish())
        });
        state.write_usize(self.entries.len());
        state.write_u64(combined);
    }
}

impl<'a, K, V> IntoIterator for &'a FrozenMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = std::iter::Map<std::slice::Iter<'a, (K, V)>, fn(&'a (K, V)) -> (&'a K, &'a V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .iter()
            .map(entry_refs as fn(&'a (K, V)) -> (&'a K, &'a V))
    }
}

const fn entry_refs<K, V>((key, value): &(K, V)) -> (&K, &V) {
    (key, value)
}

#[cfg(test)]
mod tests;
