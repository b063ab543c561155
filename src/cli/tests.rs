// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::prefs::PrefsCommand;
use crate::cli::{Cli, Command};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_no_command_defaults_to_none() {
    let cli = Cli::try_parse_from(["patchport"]).unwrap();
    assert!(cli.command.is_none());
    assert!(!cli.global.dry);
}

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["patchport", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_transfer_with_global_options() {
    let cli = Cli::try_parse_from([
        "patchport",
        "-l",
        "4",
        "--dry",
        "-c",
        "a.toml",
        "--config",
        "b.toml",
        "transfer",
    ])
    .unwrap();
    assert!(matches!(cli.command, Some(Command::Transfer)));
    assert_eq!(cli.global.log_level, Some(4));
    assert!(cli.global.dry);
    assert_eq!(
        cli.global.configs,
        [PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
}

#[test]
fn test_parse_prefs_set_root() {
    let cli = Cli::try_parse_from(["patchport", "prefs", "set-root", "/home/me/src"]).unwrap();
    match cli.command {
        Some(Command::Prefs(args)) => match args.command {
            PrefsCommand::SetRoot { dir } => assert_eq!(dir, PathBuf::from("/home/me/src")),
            PrefsCommand::Show => panic!("expected set-root"),
        },
        other => panic!("expected prefs command, got {other:?}"),
    }
}

#[test]
fn test_parse_prefs_requires_subcommand() {
    assert!(Cli::try_parse_from(["patchport", "prefs"]).is_err());
}

#[test]
fn test_parse_rejects_out_of_range_log_level() {
    assert!(Cli::try_parse_from(["patchport", "-l", "7"]).is_err());
}

#[test]
fn test_config_overrides() {
    let cli = Cli::try_parse_from([
        "patchport",
        "-l",
        "5",
        "--log-file",
        "run.log",
        "--dry",
        "--prefs",
        "/etc/patchport/defaults.json",
        "--patches",
        "/tmp/patches",
    ])
    .unwrap();

    let lines: Vec<String> = cli
        .global
        .to_config_overrides()
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    global.output_log_level=5
    global.file_log_level=5
    global.log_file=run.log
    global.dry=true
    paths.preferences=/etc/patchport/defaults.json
    paths.patches=/tmp/patches
    ");
}

#[test]
fn test_config_overrides_relative_paths_become_absolute() {
    let cli = Cli::try_parse_from(["patchport", "--patches", "out"]).unwrap();
    let overrides = cli.global.to_config_overrides();
    assert_eq!(overrides.len(), 1);
    let (key, value) = &overrides[0];
    assert_eq!(*key, "paths.patches");
    assert!(PathBuf::from(value).is_absolute());
    assert!(value.ends_with("out"));
}

#[test]
fn test_file_log_level_overrides_log_level() {
    let cli = Cli::try_parse_from(["patchport", "-l", "2", "--file-log-level", "6"]).unwrap();
    let overrides = cli.global.to_config_overrides();
    assert_eq!(
        overrides,
        [
            ("global.output_log_level", "2".to_string()),
            ("global.file_log_level", "6".to_string()),
        ]
    );
}
