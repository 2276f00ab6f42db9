// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the git object model.
//!
//! Tests the git module with real temporary repositories.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use stg_rs::git::{
    BlobData, Commit, CommitData, Date, GitObject, Perm, Person, Repository, TreeData,
};
use stg_rs::value::Field;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Helper to run git commands in a directory, returning trimmed stdout.
fn run_git(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Writes a raw commit object with `git hash-object`, returning its sha1.
fn hash_raw_commit(cwd: &Path, raw: &[u8]) -> String {
    let mut child = Command::new("git")
        .args(["hash-object", "-t", "commit", "-w", "--literally", "--stdin"])
        .current_dir(cwd)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn git");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(raw)
        .expect("write commit");
    let output = child.wait_with_output().expect("wait for git");
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn init_repo(path: &Path) -> Repository {
    run_git(&["init", "--quiet"], path);
    run_git(&["config", "user.email", "test@example.com"], path);
    run_git(&["config", "user.name", "Test"], path);
    Repository::discover(path).expect("failed to open repository")
}

fn author() -> Person {
    Person::new("A U Thor", "author@example.com", Date::new(1_700_000_000, 60))
}

fn committer() -> Person {
    Person::new("C O Mitter", "committer@example.com", Date::new(1_700_000_100, -300))
}

fn single_file_commit(repo: &Repository, content: &str, parents: Vec<Commit>) -> Commit {
    let blob = BlobData::new(content).commit(repo).unwrap();
    let tree = TreeData::new([("a.txt", blob)]).unwrap().commit(repo).unwrap();
    CommitData::new()
        .set_tree(tree)
        .set_parents(parents)
        .set_author(author())
        .set_committer(committer())
        .set_message(format!("write {content}\n"))
        .commit(repo)
        .unwrap()
}

// =============================================================================
// Blobs
// =============================================================================

#[test]
fn blob_commit_is_content_addressed() {
    let temp = temp_dir();
    let repo = init_repo(temp.path());

    let first = BlobData::new("hello\n").commit(&repo).unwrap();
    let second = BlobData::new(b"hello\n".to_vec()).commit(&repo).unwrap();
    assert_eq!(first.oid(), second.oid());
    assert_eq!(first, second);
    assert_eq!(first.oid().as_str(), "ce013625030ba8dba906f756967f9e9ca394464a");
}

#[test]
fn blob_data_reads_back_exact_bytes() {
    let temp = temp_dir();
    let repo = init_repo(temp.path());
    let bytes = vec![0_u8, 159, 146, 150, b'\n', b'\r'];

    let blob = BlobData::new(bytes.clone()).commit(&repo).unwrap();
    assert!(!blob.is_loaded());
    assert_eq!(blob.data(&repo).unwrap().bytes(), bytes.as_slice());
    assert!(blob.is_loaded());
}

// =============================================================================
// Trees
// =============================================================================

#[test]
fn tree_commit_lists_entries_like_git() {
    let temp = temp_dir();
    let repo = init_repo(temp.path());
    let blob = BlobData::new("a\n").commit(&repo).unwrap();

    let tree = TreeData::new([("a.txt", blob.clone())])
        .unwrap()
        .commit(&repo)
        .unwrap();

    let listing = run_git(&["ls-tree", tree.oid().as_str()], temp.path());
    assert_eq!(listing, format!("100644 blob {}\ta.txt", blob.oid()));
}

#[test]
fn tree_data_round_trips_through_git() {
    let temp = temp_dir();
    let repo = init_repo(temp.path());
    let readme = BlobData::new("readme\n").commit(&repo).unwrap();
    let script = BlobData::new("#!/bin/sh\n").commit(&repo).unwrap();
    let inner = TreeData::new([("run.sh", (Perm::EXECUTABLE, script))])
        .unwrap()
        .commit(&repo)
        .unwrap();

    let data = TreeData::new([
        ("README", GitObject::from(readme)),
        ("bin", GitObject::from(inner.clone())),
    ])
    .unwrap();
    let tree = data.commit(&repo).unwrap();

    let reopened = Repository::discover(temp.path()).unwrap();
    let read = reopened.get_tree(tree.oid());
    assert_eq!(read.data(&reopened).unwrap(), &data);

    let bin = read.data(&reopened).unwrap().get("bin").unwrap();
    assert_eq!(bin.perm(), Perm::DIRECTORY);
    let GitObject::Tree(nested) = bin.object() else {
        panic!("expected a tree entry, got {:?}", bin.object());
    };
    let nested = nested.data(&reopened).unwrap();
    assert_eq!(nested.get("run.sh").unwrap().perm(), Perm::EXECUTABLE);
    assert_eq!(inner.oid(), bin.object().oid());
}

#[test]
fn empty_tree_has_well_known_name() {
    let temp = temp_dir();
    let repo = init_repo(temp.path());
    let tree = TreeData::default().commit(&repo).unwrap();
    assert_eq!(tree.oid().as_str(), "4b825dc642cb6eb9a060e54bf8d69288fbee4904");
    assert!(tree.data(&repo).unwrap().entries().is_empty());
}

// =============================================================================
// Commits
// =============================================================================

#[test]
fn commit_data_round_trips_through_git() {
    let temp = temp_dir();
    let repo = init_repo(temp.path());
    let root = single_file_commit(&repo, "one", Vec::new());
    let blob = BlobData::new("two").commit(&repo).unwrap();
    let tree = TreeData::new([("a.txt", blob)]).unwrap().commit(&repo).unwrap();

    let data = CommitData::new()
        .set_tree(tree.clone())
        .set_parent(root.clone())
        .set_author(author())
        .set_committer(committer())
        .set_message("Subject line\n\nBody text.\n");
    let commit = data.commit(&repo).unwrap();

    let reopened = Repository::discover(temp.path()).unwrap();
    let read = reopened.get_commit(commit.oid()).data(&reopened).unwrap().clone();
    assert_eq!(read, data);
    assert_eq!(read.parent().unwrap().oid(), root.oid());

    let author_line = run_git(
        &["log", "-1", "--format=%an <%ae> %ad", "--date=raw", commit.oid().as_str()],
        temp.path(),
    );
    assert_eq!(author_line, "A U Thor <author@example.com> 1700000000 +0100");
}

#[test]
fn commit_without_identity_uses_git_config() {
    let temp = temp_dir();
    let repo = init_repo(temp.path());
    let tree = TreeData::default().commit(&repo).unwrap();

    let commit = CommitData::new()
        .set_tree(tree)
        .set_message("plain\n")
        .commit(&repo)
        .unwrap();
    let data = commit.data(&repo).unwrap();
    assert_eq!(data.author().get().and_then(Person::name), Some("Test"));
    assert_eq!(data.parents(), &Field::Set(Vec::new()));
}

#[test]
fn commit_requires_tree_and_message() {
    let temp = temp_dir();
    let repo = init_repo(temp.path());

    let err = CommitData::new().set_message("x").commit(&repo).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"object error: commit field 'tree' is unset");

    let tree = TreeData::default().commit(&repo).unwrap();
    let err = CommitData::new().set_tree(tree).commit(&repo).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"object error: commit field 'message' is unset");
}

#[test]
fn is_nochange_compares_tree_with_single_parent() {
    let temp = temp_dir();
    let repo = init_repo(temp.path());
    let root = single_file_commit(&repo, "one", Vec::new());
    let root_tree = root.data(&repo).unwrap().tree().get().unwrap().clone();

    let same = CommitData::new().set_tree(root_tree.clone()).set_parent(root.clone());
    assert!(same.is_nochange(&repo).unwrap());

    let treeless = CommitData::new().set_parent(root.clone());
    assert!(!treeless.is_nochange(&repo).unwrap());

    let changed = single_file_commit(&repo, "two", vec![root.clone()]);
    assert!(!changed.data(&repo).unwrap().is_nochange(&repo).unwrap());

    let merge = same.add_parent(changed);
    assert!(!merge.is_nochange(&repo).unwrap());
    assert!(merge.parent().is_err());
}

#[test]
fn commit_parse_preserves_parent_order() {
    let temp = temp_dir();
    let repo = init_repo(temp.path());
    let first = single_file_commit(&repo, "one", Vec::new());
    let second = single_file_commit(&repo, "two", Vec::new());

    let merge = single_file_commit(&repo, "merge", vec![second.clone(), first.clone()]);
    let reopened = Repository::discover(temp.path()).unwrap();
    let parents = reopened
        .get_commit(merge.oid())
        .data(&reopened)
        .unwrap()
        .parents()
        .get()
        .unwrap()
        .iter()
        .map(|c| c.oid().clone())
        .collect::<Vec<_>>();
    assert_eq!(parents, vec![second.oid().clone(), first.oid().clone()]);
}

#[test]
fn commit_parse_joins_multi_line_headers() {
    let temp = temp_dir();
    let repo = init_repo(temp.path());
    let tree = TreeData::default().commit(&repo).unwrap();

    let raw = format!(
        "tree {}\n\
         author A <a@example.com> 1700000000 +0000\n\
         committer A <a@example.com> 1700000000 +0000\n\
         x-note first\n second\n\
         \n\
         message\n",
        tree.oid()
    );
    let sha1 = hash_raw_commit(temp.path(), raw.as_bytes());

    let commit = repo.get_commit(&sha1.parse().unwrap());
    let data = commit.data(&repo).unwrap();
    assert_eq!(data.tree().get(), Some(&tree));
    assert_eq!(data.message(), &Field::Set("message\n".to_string()));
}

#[test]
fn commit_data_decodes_declared_encoding() {
    let temp = temp_dir();
    let repo = init_repo(temp.path());
    let tree = TreeData::default().commit(&repo).unwrap();

    let mut raw = format!(
        "tree {}\n\
         author A <a@example.com> 1700000000 +0000\n\
         committer A <a@example.com> 1700000000 +0000\n\
         encoding ISO-8859-1\n\
         \n\
         caf",
        tree.oid()
    )
    .into_bytes();
    raw.extend_from_slice(b"\xe9\n");
    let sha1 = hash_raw_commit(temp.path(), &raw);

    let data = repo.get_commit(&sha1.parse().unwrap()).data(&repo).unwrap().clone();
    assert_eq!(data.message(), &Field::Set("caf\u{e9}\n".to_string()));
}
