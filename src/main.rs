// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Transfer (default) | Options | Prefs | Version
//! ```

use std::process::ExitCode;

use patchport::cli::global::GlobalOptions;
use patchport::cli::{self, Command};
use patchport::cmd::config::run_options_command;
use patchport::cmd::prefs::run_prefs_command;
use patchport::cmd::transfer::run_transfer_command;
use patchport::config::Config;
use patchport::config::loader::ConfigLoader;
use patchport::error::PortError;
use patchport::logging::init_logging;
use patchport::logging::LogConfig;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let loader = match build_config_loader(&cli.global) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let config_files = loader.format_loaded_files();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&config);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config, &config_files)
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file()
                .map(|p| p.display().to_string()),
        )
        .build()
}

fn dispatch_command(cli: &cli::Cli, config: &Config, config_files: &[String]) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config, config_files);
            Ok(())
        }
        Some(Command::Prefs(args)) => run_prefs_command(args, config),
        Some(Command::Transfer) | None => run_transfer_command(config, config.global.dry),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.downcast_ref::<PortError>().is_some_and(PortError::is_cancelled) => {
            eprintln!("Cancelled.");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> patchport::error::Result<ConfigLoader> {
    Config::layered(&global.configs).with_overrides(global.to_config_overrides())
}
