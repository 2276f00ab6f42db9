// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Field, FrozenMap};
use std::collections::HashSet;

#[test]
fn test_field_unset_is_not_empty() {
    let unset: Field<Vec<u8>> = Field::Unset;
    let empty: Field<Vec<u8>> = Field::Set(Vec::new());
    assert_ne!(unset, empty);
    assert!(unset.is_unset());
    assert!(empty.is_set());
    assert_eq!(empty.get(), Some(&Vec::new()));
}

#[test]
fn test_field_or_prefers_set_value() {
    assert_eq!(Field::Set(1).or(Field::Set(2)), Field::Set(1));
    assert_eq!(Field::Unset.or(Field::Set(2)), Field::Set(2));
    assert_eq!(Field::<i32>::Unset.or(Field::Unset), Field::Unset);
}

#[test]
fn test_field_require_names_field() {
    let err = Field::<String>::Unset
        .require("message")
        .expect_err("unset field should fail");
    insta::assert_snapshot!(err.to_string(), @"object error: commit field 'message' is unset");
}

#[test]
fn test_frozen_map_preserves_insertion_order() {
    let map = FrozenMap::try_from_iter([("b", 2), ("a", 1), ("c", 3)]).unwrap();
    let keys: Vec<_> = map.keys().copied().collect();
    assert_eq!(keys, vec!["b", "a", "c"]);
    assert_eq!(map.get("a"), Some(&1));
    assert!(!map.contains_key("z"));
    assert_eq!(map.len(), 3);
}

#[test]
fn test_frozen_map_rejects_duplicates() {
    let dup = FrozenMap::try_from_iter([("a", 1), ("b", 2), ("a", 3)]);
    assert_eq!(dup.err(), Some("a"));
}

#[test]
fn test_frozen_map_equality_ignores_order() {
    let left = FrozenMap::try_from_iter([("a", 1), ("b", 2)]).unwrap();
    let right = FrozenMap::try_from_iter([("b", 2), ("a", 1)]).unwrap();
    let other = FrozenMap::try_from_iter([("a", 1), ("b", 3)]).unwrap();
    assert_eq!(left, right);
    assert_ne!(left, other);

    let set: HashSet<_> = [left, right].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_frozen_map_default_is_empty() {
    let map: FrozenMap<String, u32> = FrozenMap::default();
    assert!(map.is_empty());
    assert_eq!((&map).into_iter().count(), 0);
}
