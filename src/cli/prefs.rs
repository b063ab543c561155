// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `prefs` command arguments.

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub command: PrefsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Prints the saved preference record.
    Show,

    /// Saves DIR as the directory containing the repositories.
    #[command(name = "set-root")]
    SetRoot {
        /// Directory whose subdirectories are offered as repositories
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
}
