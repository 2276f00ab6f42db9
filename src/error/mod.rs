// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!               StgError (~24 bytes)
//!                      |
//!   +------+-----+-----+-----+------+-----+----+
//!   |      |     |     |     |      |     |    |
//!   v      v     v     v     v      v     v    v
//! Bail   Git  Object Stack Config Proc  Cmd  Io
//! Box<str> Box Box   Box   Box    Box   Box  Box
//!
//! Sub-errors (unboxed internally):
//!   Git      Gix, DetachedHead, BranchNotFound
//!   Object   InvalidOid, MalformedTreeEntry, MalformedHeader, UnsetField, ...
//!   Stack    AlreadyInitialized, Metadata
//!   Config   Load, Invalid, Override
//!   Process  ExecutableNotFound, SpawnFailed, NonZeroExit
//!   Command  TargetExists
//!
//! All variants boxed => StgError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`StgError`].
pub type StgResult<T> = std::result::Result<T, StgError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
/// Variants render their inner error and do not report it as a source, so
/// an `{:#}` chain names each failure once.
#[derive(Debug, Error)]
pub enum StgError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Repository-level git failure.
    #[error("git error: {0}")]
    Git(Box<GitError>),

    /// Object model precondition or parse failure.
    #[error("object error: {0}")]
    Object(Box<ObjectError>),

    /// Stack metadata error.
    #[error("stack error: {0}")]
    Stack(Box<StackError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(Box<ConfigError>),

    /// Subprocess execution error.
    #[error("process error: {0}")]
    Process(Box<ProcessError>),

    /// Command precondition failed.
    #[error("{0}")]
    Command(Box<CommandError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

/// Create a fatal [`StgError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> StgError {
    StgError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for StgError {
                fn from(err: $error) -> Self {
                    StgError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ObjectError => Object,
    StackError => Stack,
    ConfigError => Config,
    ProcessError => Process,
    CommandError => Command,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(Box<gix::discover::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(gix::reference::find::existing::Error),

    /// Failed to look up a reference.
    #[error("failed to read reference: {0}")]
    Reference(gix::reference::find::existing::Error),
}

// --- Git Errors ---

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(GixError),

    /// HEAD does not point to a branch.
    #[error("HEAD is detached in {path}")]
    DetachedHead { path: String },

    /// Branch not found.
    #[error("branch not found: {branch}")]
    BranchNotFound { branch: String },
}

// --- Object Errors ---

/// Object model errors: malformed git output and violated preconditions.
#[derive(Debug, Error)]
pub enum ObjectError {
    /// Not a 40-character lowercase hex object name.
    #[error("invalid object name: '{value}'")]
    InvalidOid { value: String },

    /// Unknown object type tag.
    #[error("unknown object type: '{typename}'")]
    UnknownType { typename: String },

    /// Not a six-digit octal file mode.
    #[error("invalid permission: '{value}'")]
    InvalidPerm { value: String },

    /// Tree listing line does not match `<perm> <type> <sha1>\t<name>`.
    #[error("malformed tree entry: '{line}'")]
    MalformedTreeEntry { line: String },

    /// Identity line does not match `NAME <EMAIL> TIMESTAMP TZOFFSET`.
    #[error("malformed person: '{line}'")]
    MalformedPerson { line: String },

    /// Date does not match `TIMESTAMP TZOFFSET`.
    #[error("malformed date: '{value}'")]
    MalformedDate { value: String },

    /// Tree entry name contains a path separator.
    #[error("tree entry name contains slash: '{name}'")]
    SlashInEntryName { name: String },

    /// Tree entry name used twice.
    #[error("duplicate tree entry name: '{name}'")]
    DuplicateEntryName { name: String },

    /// Commit header block is not `key value` lines.
    #[error("malformed commit header: '{line}'")]
    MalformedHeader { line: String },

    /// A commit field required for this operation was never set.
    #[error("commit field '{field}' is unset")]
    UnsetField { field: &'static str },

    /// `parent` requires exactly one parent.
    #[error("expected exactly one parent, found {count}")]
    ParentCount { count: usize },

    /// Object content is not valid in the expected encoding.
    #[error("object {oid} is not valid {encoding}")]
    Undecodable { oid: String, encoding: String },
}

// --- Stack Errors ---

/// Stack metadata errors.
#[derive(Debug, Error)]
pub enum StackError {
    /// Branch already carries stack metadata.
    #[error("branch '{branch}' is already initialized")]
    AlreadyInitialized { branch: String },

    /// Metadata could not be serialized.
    #[error("failed to serialize stack metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

// --- Config Errors ---

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required file is missing or a file is not valid TOML.
    #[error("failed to load configuration: {0}")]
    Load(config::ConfigError),

    /// Merged values do not match the expected sections and types.
    #[error("invalid configuration: {0}")]
    Invalid(config::ConfigError),

    /// A command-line override names an invalid key.
    #[error("invalid override for '{key}': {source}")]
    Override {
        key: String,
        #[source]
        source: config::ConfigError,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("'{command}' exited with code {code}: {stderr}")]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },

    /// Output did not have the expected shape.
    #[error("unexpected output from '{command}': {output:?}")]
    UnexpectedOutput { command: String, output: String },

    /// Failed to write stdin or read output.
    #[error("failed to communicate with process '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Command Errors ---

/// User-facing command precondition errors.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Clone target already exists.
    #[error("\"{path}\" exists. Remove it first")]
    TargetExists { path: String },
}
