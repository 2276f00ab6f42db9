// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use std::process::Command;

use super::{METADATA_FILE, Stack, StackMetadata};
use crate::git::Repository;
use crate::value::Field;

fn git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .expect("run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Repository with one empty commit; returns the branch name.
fn init_test_repo_with_commit(path: &Path) -> String {
    git(path, &["init", "--quiet"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test"]);
    git(path, &["commit", "--allow-empty", "-m", "Initial commit", "--quiet"]);
    git(path, &["branch", "--show-current"])
}

#[test]
fn test_metadata_json_layout() {
    let metadata = StackMetadata {
        version: 5,
        prev: None,
        head: "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391".to_string(),
        applied: Vec::new(),
        unapplied: Vec::new(),
        hidden: Vec::new(),
    };
    insta::assert_snapshot!(
        metadata.to_json().unwrap(),
        @r#"{"version":5,"prev":null,"head":"e69de29bb2d1d6434b8b29ae775ad8c2e48c5391","applied":[],"unapplied":[],"hidden":[]}"#
    );
}

#[test]
fn test_initialise_writes_metadata_ref() {
    let temp = tempfile::tempdir().unwrap();
    let branch = init_test_repo_with_commit(temp.path());
    let repo = Repository::discover(temp.path()).unwrap();

    assert!(!Stack::is_initialised(&repo, &branch).unwrap());
    let commit = Stack::initialise(&repo, &branch).unwrap();
    assert!(Stack::is_initialised(&repo, &branch).unwrap());

    let stacked = git(temp.path(), &["rev-parse", &Stack::ref_name(&branch)]);
    assert_eq!(stacked, commit.oid().as_str());

    let data = commit.data(&repo).unwrap();
    assert_eq!(data.parents(), &Field::Set(Vec::new()));
    assert_eq!(data.message(), &Field::Set("stack initialization\n".to_string()));

    let head = git(temp.path(), &["rev-parse", "HEAD"]);
    let tree = data.tree().get().unwrap().data(&repo).unwrap();
    let blob = tree
        .get(METADATA_FILE)
        .and_then(|entry| entry.object().as_blob())
        .unwrap();
    let json = String::from_utf8(blob.data(&repo).unwrap().bytes().to_vec()).unwrap();
    assert!(json.contains(&format!("\"head\":\"{head}\"")));
}

#[test]
fn test_initialise_twice_fails() {
    let temp = tempfile::tempdir().unwrap();
    let branch = init_test_repo_with_commit(temp.path());
    let repo = Repository::discover(temp.path()).unwrap();

    Stack::initialise(&repo, &branch).unwrap();
    let err = Stack::initialise(&repo, &branch).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("stack error: branch '{branch}' is already initialized")
    );
}

#[test]
fn test_initialise_unborn_branch_fails() {
    let temp = tempfile::tempdir().unwrap();
    git(temp.path(), &["init", "--quiet"]);
    let repo = Repository::discover(temp.path()).unwrap();

    let err = Stack::initialise(&repo, "nowhere").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"git error: branch not found: nowhere");
}
