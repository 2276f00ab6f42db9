// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Describing a git (or other) invocation before running it.
//!
//! ```text
//! ProcessBuilder
//!  • new / which / find         program, PATH lookups cached
//!  • arg / args / cwd / env / envs / flag
//!  • raw_input / input_nulterm  stdin
//!
//! ProcessFlags: ALLOW_FAILURE, INHERIT_STDIO
//! ```

use bitflags::bitflags;
use std::collections::{BTreeMap, HashMap};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::error::ProcessError;

/// `which` results by program name, misses included.
static LOOKUPS: OnceLock<Mutex<HashMap<String, Option<PathBuf>>>> = OnceLock::new();

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ProcessFlags: u8 {
        /// A non-zero exit is returned as output, not as an error.
        const ALLOW_FAILURE = 1;
        /// stdout and stderr go straight to the terminal.
        const INHERIT_STDIO = 1 << 1;
    }
}

/// What a finished process left behind.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    exit_code: i32,
    stdout: Vec<u8>,
    stderr: String,
}

impl ProcessOutput {
    pub(super) const fn new(exit_code: i32, stdout: Vec<u8>, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }

    /// Exit status; `-1` if the process was killed by a signal.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Captured stdout; empty with `INHERIT_STDIO`.
    #[must_use]
    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    #[must_use]
    pub fn into_stdout(self) -> Vec<u8> {
        self.stdout
    }

    /// Captured stderr, lossily decoded and right-trimmed.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}

/// A process invocation. Nothing runs until one of the runner methods
/// (`run`, `output_*`, `discard_output`) consumes it.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    pub(super) program: PathBuf,
    pub(super) args: Vec<OsString>,
    pub(super) cwd: Option<PathBuf>,
    /// Added on top of the inherited environment.
    pub(super) env: BTreeMap<String, String>,
    pub(super) flags: ProcessFlags,
    pub(super) stdin: Option<Vec<u8>>,
}

impl ProcessBuilder {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            env: BTreeMap::new(),
            flags: ProcessFlags::empty(),
            stdin: None,
        }
    }

    /// A builder for `program` resolved through `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if `program` cannot be found.
    pub fn which(program: &str) -> Result<Self, ProcessError> {
        Self::find(program)
            .map(Self::new)
            .ok_or_else(|| ProcessError::ExecutableNotFound {
                name: program.to_string(),
            })
    }

    /// Full path of `program`, looked up once per process lifetime.
    #[must_use]
    pub fn find(program: &str) -> Option<PathBuf> {
        let mut lookups = LOOKUPS
            .get_or_init(Mutex::default)
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        lookups
            .entry(program.to_string())
            .or_insert_with(|| which::which(program).ok())
            .clone()
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
        self
    }

    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    #[must_use]
    pub fn flag(mut self, flag: ProcessFlags) -> Self {
        self.flags |= flag;
        self
    }

    /// Bytes written to stdin verbatim.
    #[must_use]
    pub fn raw_input(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(content.into());
        self
    }

    /// Records written to stdin, each followed by a NUL byte.
    #[must_use]
    pub fn input_nulterm<I, S>(self, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let content = records.into_iter().fold(Vec::new(), |mut buf, record| {
            buf.extend_from_slice(record.as_ref().as_bytes());
            buf.push(b'\0');
            buf
        });
        self.raw_input(content)
    }
}
