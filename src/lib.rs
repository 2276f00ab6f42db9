// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |              clone / init
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '-------------+-------------'
//!                            |
//!                            v
//!              stack  (metadata ref, stack.json)
//!                            |
//!                            v
//!              git    Repository + object model
//!                     Blob / Tree / Commit
//!                            |
//!   +-----------------------------------------+
//!   |  core   process (git subprocesses)      |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, value     |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod stack;
pub mod value;
