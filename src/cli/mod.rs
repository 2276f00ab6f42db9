// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command-line interface (clap derive).
//!
//! ```text
//! stg [-c FILE]... [-l N] [--file-log-level N] [--log-file FILE] <command>
//!   version
//!   options                     effective configuration
//!   configs                     configuration files, in load order
//!   clone [-q] [--recurse-submodules] <repository> <dir>
//!   init                        stack on the current branch
//! ```

pub mod clone;
pub mod global;


use crate::cli::clone::CloneArgs;
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Stacked Git - Rust Port
///
/// Manage a stack of patches on top of a git branch.
#[derive(Debug, Parser)]
#[command(
    name = "stg",
    author,
    version,
    about = "Stacked Git",
    long_about = "stg-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Manage a stack of patches on top of a git branch.",
    after_help = "CONFIG FILES:\n\n\
                  stg reads `stg.toml` from the current directory if it exists,\n\
                  then every file given with --config, in order. Variables named\n\
                  STG_<SECTION>__<KEY> (e.g. STG_GIT__EXECUTABLE) override both."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Lists the configuration files that were loaded.
    Configs,

    /// Makes a local clone of a remote repository and initialises its stack.
    Clone(CloneArgs),

    /// Initialises an empty stack on the current branch.
    Init,
}

/// Parses `std::env::args`, exiting with usage on error.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
