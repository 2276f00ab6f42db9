// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and output shaping.
//!
//! ```text
//! run()
//!   |
//!   v
//! build_command()   args, cwd, env, stdio
//!   |
//!   v
//! spawn() --> stdin writer thread (optional)
//!   |
//!   v
//! wait_with_output()
//!   |
//!   v
//! validate exit_code (skip if ALLOW_FAILURE)
//!   |
//!   v
//! ProcessOutput { exit_code, stdout, stderr }
//!   |
//!   +--> output_bytes / output_text / output_one_line / output_lines
//! ```

use std::io::{ErrorKind, Write as _};
use std::process::{Command, Stdio};
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{ProcessError, StgResult};

impl ProcessBuilder {
    /// Program file name without directories, e.g. `git`.
    fn display_name(&self) -> String {
        self.program
            .file_stem()
            .map_or_else(|| "process".to_string(), |s| s.to_string_lossy().into_owned())
    }

    /// Returns the command line as a string (for logging and errors).
    #[must_use]
    pub fn command_line(&self) -> String {
        use std::fmt::Write as _;
        let mut cmd = self.display_name();
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns the process and blocks until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Spawning the child process fails.
    /// - Writing stdin or collecting output fails.
    /// - The process exits with a non-success code (and `ALLOW_FAILURE` is not set).
    pub fn run(self) -> StgResult<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if let Some(cwd) = &self.cwd {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut child = self
            .build_command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;
        trace!(process = %name, pid = child.id(), "spawned");

        // Feed stdin from a separate thread so a large input cannot deadlock
        // against a child blocked on a full stdout pipe.
        let stdin = child.stdin.take();
        let (waited, written) = std::thread::scope(|scope| {
            let writer = stdin.zip(self.stdin.as_deref()).map(|(mut pipe, content)| {
                scope.spawn(move || match pipe.write_all(content) {
                    Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
                    other => other,
                })
            });
            let waited = child.wait_with_output();
            let written = writer.map_or(Ok(()), |handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")))
            });
            (waited, written)
        });

        let io_error = |source| ProcessError::Io {
            command: cmd_line.clone(),
            source,
        };
        let raw = waited.map_err(io_error)?;
        written.map_err(io_error)?;

        let output = ProcessOutput::new(
            raw.status.code().unwrap_or(-1),
            raw.stdout,
            String::from_utf8_lossy(&raw.stderr).trim_end().to_string(),
        );

        if !output.success() && !self.flags.contains(ProcessFlags::ALLOW_FAILURE) {
            if !output.stderr().is_empty() {
                error!(process = %name, stderr = %output.stderr(), "process error output");
            }
            return Err(ProcessError::NonZeroExit {
                command: cmd_line,
                code: output.exit_code(),
                stderr: output.stderr().to_string(),
            }
            .into());
        }

        trace!(process = %name, exit_code = output.exit_code(), "completed");
        Ok(output)
    }

    /// Runs the process and discards its output.
    ///
    /// # Errors
    ///
    /// See [`ProcessBuilder::run`].
    pub fn discard_output(self) -> StgResult<()> {
        self.run().map(|_| ())
    }

    /// Runs the process and returns stdout untouched.
    ///
    /// # Errors
    ///
    /// See [`ProcessBuilder::run`].
    pub fn output_bytes(self) -> StgResult<Vec<u8>> {
        self.run().map(ProcessOutput::into_stdout)
    }

    /// Runs the process and returns stdout as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::UnexpectedOutput` if stdout is not valid UTF-8,
    /// otherwise see [`ProcessBuilder::run`].
    pub fn output_text(self) -> StgResult<String> {
        let cmd_line = self.command_line();
        let bytes = self.output_bytes()?;
        String::from_utf8(bytes).map_err(|e| {
            ProcessError::UnexpectedOutput {
                command: cmd_line,
                output: String::from_utf8_lossy(e.as_bytes()).into_owned(),
            }
            .into()
        })
    }

    /// Runs the process and expects exactly one line of output.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::UnexpectedOutput` if the output is empty or has
    /// more than one line, otherwise see [`ProcessBuilder::output_text`].
    pub fn output_one_line(self) -> StgResult<String> {
        let cmd_line = self.command_line();
        let text = self.output_text()?;
        let mut lines = text.lines();
        match (lines.next(), lines.next()) {
            (Some(line), None) => Ok(line.trim_end().to_string()),
            _ => Err(ProcessError::UnexpectedOutput {
                command: cmd_line,
                output: text,
            }
            .into()),
        }
    }

    /// Runs the process and splits stdout on `separator`.
    ///
    /// A trailing separator does not produce an empty final record.
    ///
    /// # Errors
    ///
    /// See [`ProcessBuilder::output_text`].
    pub fn output_lines(self, separator: char) -> StgResult<Vec<String>> {
        let text = self.output_text()?;
        Ok(split_records(&text, separator))
    }

    fn build_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).envs(&self.env);

        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }

        if self.stdin.is_some() {
            command.stdin(Stdio::piped());
        } else {
            command.stdin(Stdio::null());
        }

        if self.flags.contains(ProcessFlags::INHERIT_STDIO) {
            command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            command.stdout(Stdio::piped()).stderr(Stdio::piped());
        }

        command
    }
}

/// Splits `text` into records separated by `separator`, dropping the empty
/// record a terminating separator leaves behind.
pub(super) fn split_records(text: &str, separator: char) -> Vec<String> {
    let text = text.strip_suffix(separator).unwrap_or(text);
    if text.is_empty() {
        return Vec::new();
    }
    text.split(separator).map(str::to_string).collect()
}
