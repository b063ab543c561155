// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional config files (can repeat)
//! --dry             ← Log git mutations instead of running them
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (overrides --log-level)
//! --prefs FILE      ← paths.preferences override
//! --patches DIR     ← paths.patches override
//!
//! Precedence: CLI flags > env > --config > patchport.toml > defaults
//! ```

use clap::Args;
use std::path::{Path, PathBuf};

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Plans the transfer and logs format-patch, checkout and am instead of
    /// running them. Branches and commits are still listed.
    #[arg(long)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Preference file holding the last repository directory.
    #[arg(long = "prefs", value_name = "FILE")]
    pub prefs: Option<PathBuf>,

    /// Scratch directory for exported patches. Emptied on every transfer.
    #[arg(long = "patches", value_name = "DIR")]
    pub patches: Option<PathBuf>,
}

impl GlobalOptions {
    /// Converts command-line options to `(key, value)` configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();

        if let Some(level) = self.log_level {
            overrides.push(("global.output_log_level", level.to_string()));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(("global.file_log_level", level.to_string()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file", path.display().to_string()));
        }

        if self.dry {
            overrides.push(("global.dry", "true".to_string()));
        }

        // relative paths given on the command line are taken from the current
        // directory, not from the executable's
        if let Some(ref path) = self.prefs {
            overrides.push(("paths.preferences", absolute_display(path)));
        }

        if let Some(ref path) = self.patches {
            overrides.push(("paths.patches", absolute_display(path)));
        }

        overrides
    }
}

fn absolute_display(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
