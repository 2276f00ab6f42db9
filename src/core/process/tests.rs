// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::builder::{ProcessBuilder, ProcessFlags};
use super::runner::split_records;
use crate::error::{ProcessError, StgError};

fn sh(script: &str) -> ProcessBuilder {
    ProcessBuilder::new("/bin/sh").arg("-c").arg(script)
}

#[cfg(unix)]
#[test]
fn test_process_echo() {
    let line = ProcessBuilder::new("echo")
        .arg("hello")
        .output_one_line()
        .expect("echo should succeed");
    insta::assert_snapshot!(line, @"hello");
}

#[cfg(unix)]
#[test]
fn test_process_exit_code_allowed() {
    let output = sh("exit 42")
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .expect("process should complete");
    assert_eq!(output.exit_code(), 42);
    assert!(!output.success());
}

#[cfg(unix)]
#[test]
fn test_process_failure_carries_stderr() {
    let err = sh("echo 'fatal: bad object' >&2; exit 128")
        .run()
        .expect_err("non-zero exit should fail");
    match err {
        StgError::Process(e) => match *e {
            ProcessError::NonZeroExit { code, stderr, .. } => {
                assert_eq!(code, 128);
                assert_eq!(stderr, "fatal: bad object");
            }
            other => panic!("unexpected process error: {other}"),
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(unix)]
#[test]
fn test_process_env() {
    let line = sh("echo $STG_TEST_VAR")
        .env("STG_TEST_VAR", "test_value")
        .output_one_line()
        .expect("process should succeed");
    insta::assert_snapshot!(line, @"test_value");
}

#[cfg(unix)]
#[test]
fn test_process_raw_input_is_passed_through() {
    let bytes = ProcessBuilder::new("cat")
        .raw_input(vec![0u8, 159, 146, 150, b'\n'])
        .output_bytes()
        .expect("cat should succeed");
    assert_eq!(bytes, vec![0u8, 159, 146, 150, b'\n']);
}

#[cfg(unix)]
#[test]
fn test_process_input_nulterm() {
    let records = ProcessBuilder::new("cat")
        .input_nulterm(["one", "two words"])
        .output_lines('\0')
        .expect("cat should succeed");
    assert_eq!(records, vec!["one".to_string(), "two words".to_string()]);
}

#[cfg(unix)]
#[test]
fn test_process_large_input_does_not_deadlock() {
    let input = vec![b'x'; 1 << 20];
    let bytes = ProcessBuilder::new("cat")
        .raw_input(input.clone())
        .output_bytes()
        .expect("cat should succeed");
    assert_eq!(bytes.len(), input.len());
}

#[cfg(unix)]
#[test]
fn test_output_one_line_rejects_multiple_lines() {
    let err = sh("printf 'a\\nb\\n'")
        .output_one_line()
        .expect_err("two lines should be rejected");
    assert!(matches!(err, StgError::Process(ref e) if matches!(**e, ProcessError::UnexpectedOutput { .. })));
}

#[test]
fn test_spawn_failure() {
    let err = ProcessBuilder::new("/nonexistent/stg-test-binary")
        .run()
        .expect_err("spawn should fail");
    assert!(err.to_string().contains("failed to spawn"));
}

#[test]
fn test_split_records() {
    assert_eq!(split_records("a\0b\0", '\0'), vec!["a", "b"]);
    assert_eq!(split_records("a\nb", '\n'), vec!["a", "b"]);
    assert!(split_records("", '\0').is_empty());
    assert_eq!(split_records("\0", '\0'), Vec::<String>::new());
}

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("/usr/bin/git")
        .args(["commit-tree", "-m", "two words"]);
    insta::assert_snapshot!(builder.command_line(), @r#"git commit-tree -m "two words""#);
}

#[test]
fn test_executable_lookup_missing() {
    assert!(ProcessBuilder::find("stg-definitely-not-a-real-binary").is_none());
    assert!(ProcessBuilder::which("stg-definitely-not-a-real-binary").is_err());
}

#[cfg(unix)]
#[test]
fn test_executable_lookup_is_cached() {
    let first = ProcessBuilder::find("sh").expect("sh is on PATH");
    assert_eq!(ProcessBuilder::find("sh"), Some(first));
}
