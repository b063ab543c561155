// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for patchport using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! patchport [global options] [command]
//! transfer            (default)
//! options
//! prefs {show|set-root DIR}
//! version
//! ```

pub mod global;
pub mod prefs;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::prefs::PrefsArgs;
use clap::{Parser, Subcommand};

/// Copy a range of commits from one local git repository to another.
#[derive(Debug, Parser)]
#[command(
    name = "patchport",
    author,
    version,
    about = "Copy commit ranges between local git repositories",
    long_about = "patchport Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Asks for a directory of repositories, a source repository and\n\
                  branch, a destination repository and branch, and the oldest\n\
                  commit to copy. The commits are exported with `git format-patch`\n\
                  and applied on the destination branch with `git am --3way`.",
    after_help = "CONFIG FILES:\n\n\
                  patchport reads `patchport.toml` next to the executable, then\n\
                  `patchport.toml` in the current directory, then every file given\n\
                  with --config, in that order. PATCHPORT_<SECTION>__<KEY>\n\
                  environment variables and command line flags override them.\n\n\
                  The last repository directory is remembered in the preference\n\
                  file (defaults.json). Create it with `patchport prefs set-root`\n\
                  before the first transfer."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute (defaults to `transfer`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their resolved values.
    Options,

    /// Copies a commit range interactively (the default command).
    Transfer,

    /// Reads or writes the preference file.
    Prefs(PrefsArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
