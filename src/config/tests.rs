// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Config, ConfigLoader, ConfigSource, LOCAL_CONFIG_FILE};
use crate::logging::LogLevel;
use std::path::PathBuf;

#[test]
fn test_default_config() {
    let config = Config::default();
    insta::assert_snapshot!(config.format_options().join("\n"), @r"
    clone.quiet              = false
    clone.recurse_submodules = false
    git.executable           = git
    git.terminal_prompt      = false
    global.file_log_level    = 4
    global.log_level         = 2
    ");
}

#[test]
fn test_config_parse_sections() {
    let config = Config::parse(
        r#"
            [global]
            log_level = 5
            log_file = "logs/stg.log"

            [git]
            executable = "/opt/git/bin/git"

            [clone]
            recurse_submodules = true
            "#,
    )
    .unwrap();

    assert_eq!(config.global.log_level, LogLevel::TRACE);
    assert_eq!(config.global.log_file, Some(PathBuf::from("logs/stg.log")));
    assert_eq!(config.git.executable, "/opt/git/bin/git");
    assert!(!config.git.terminal_prompt);
    assert!(config.clone.recurse_submodules);
    assert!(!config.clone.quiet);
}

#[test]
fn test_log_level_out_of_range_rejected() {
    let err = Config::parse("[global]\nlog_level = 9\n").expect_err("out of range");
    assert!(err.to_string().contains("log level must be 0-5, got 9"), "{err}");
}

#[test]
fn test_deny_unknown_fields() {
    assert!(Config::parse("[clone]\nshallow = true\n").is_err());
    assert!(Config::parse("[unknown_section]\nfoo = \"bar\"\n").is_err());
}

#[test]
fn test_later_sources_win() {
    let config = Config::builder()
        .add_toml_str("[clone]\nquiet = true\n[git]\nexecutable = \"first\"\n")
        .add_toml_str("[git]\nexecutable = \"second\"\n")
        .build()
        .unwrap();
    assert!(config.clone.quiet);
    assert_eq!(config.git.executable, "second");
}

#[test]
fn test_override_beats_files() {
    let config = Config::builder()
        .add_toml_str("[global]\nlog_level = 1\n")
        .set("global.log_level", 4)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.global.log_level, LogLevel::DEBUG);
}

#[test]
fn test_config_loader_lists_only_present_sources() {
    let loader = ConfigLoader::new()
        .add_toml_str("[clone]\n quiet = true")
        .add_toml_file_optional("/nonexistent/optional.toml")
        .add_toml_str("[git]\n terminal_prompt = true");

    insta::assert_snapshot!(loader.format_sources().join("\n"), @r"
    1. <inline>
    2. <inline>
    ");
}

#[test]
fn test_standard_layers_read_local_file() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join(LOCAL_CONFIG_FILE), "[clone]\nquiet = true\n").unwrap();
    let extra = temp.path().join("extra.toml");
    std::fs::write(&extra, "[git]\nterminal_prompt = true\n").unwrap();

    let loader = Config::loader(temp.path(), std::slice::from_ref(&extra));
    assert_eq!(
        loader.sources(),
        &[
            ConfigSource::Optional(temp.path().join(LOCAL_CONFIG_FILE)),
            ConfigSource::File(extra.clone()),
        ]
    );

    let config = loader.build().unwrap();
    assert!(config.clone.quiet);
    assert!(config.git.terminal_prompt);
}

#[test]
fn test_standard_layers_require_explicit_files() {
    let temp = tempfile::tempdir().unwrap();
    let missing = temp.path().join("missing.toml");
    assert!(Config::load(temp.path(), &[missing]).is_err());
}
