// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Version | Options | Configs | Clone | Init
//! ```

use std::path::Path;
use std::process::ExitCode;

use stg_rs::cli::{self, Command};
use stg_rs::cmd::clone::run_clone_command;
use stg_rs::cmd::config::{run_configs_command, run_options_command};
use stg_rs::cmd::init::run_init_command;
use stg_rs::config::{Config, ConfigLoader};
use stg_rs::error::Result;
use stg_rs::logging::{LogConfig, LogGuard, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &cli::Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;

    let Some(command) = &cli.command else {
        anyhow::bail!("No command specified. Use --help for usage information.");
    };

    let loader = build_config_loader(cli, &cwd)?;
    match command {
        Command::Version => {
            println!("stg {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Configs => {
            run_configs_command(&loader.format_sources());
            Ok(())
        }
        Command::Options | Command::Clone(_) | Command::Init => {
            let config = loader.build()?;
            let _log_guard = start_logging(&config)?;
            dispatch_command(command, &config, &cwd)
        }
    }
}

fn dispatch_command(command: &Command, config: &Config, cwd: &Path) -> Result<()> {
    match command {
        Command::Options => {
            run_options_command(config);
            Ok(())
        }
        Command::Clone(args) => run_clone_command(args, config),
        Command::Init => run_init_command(cwd, config),
        Command::Version | Command::Configs => Ok(()),
    }
}

fn build_config_loader(cli: &cli::Cli, cwd: &Path) -> Result<ConfigLoader> {
    let mut loader = Config::loader(cwd, &cli.global.configs);
    let mut overrides = cli.global.to_config_overrides();
    if let Some(Command::Clone(args)) = &cli.command {
        overrides.extend(args.to_config_overrides());
    }
    for (key, value) in overrides {
        loader = loader.set(key, value)?;
    }
    Ok(loader)
}

fn start_logging(config: &Config) -> Result<LogGuard> {
    let log_config = LogConfig::builder()
        .with_console_level(config.global.log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(config.global.log_file.clone())
        .build();
    init_logging(&log_config)
}
