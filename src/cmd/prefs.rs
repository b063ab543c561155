// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Preference file commands.

use anyhow::Context;
use tracing::{info, warn};

use crate::cli::prefs::{PrefsArgs, PrefsCommand};
use crate::config::Config;
use crate::error::Result;
use crate::prefs::{PreferenceStore, Preferences};

/// Main handler for the prefs command.
///
/// # Errors
///
/// Returns an error if the preference file cannot be read, parsed or written.
pub fn run_prefs_command(args: &PrefsArgs, config: &Config) -> Result<()> {
    let store = PreferenceStore::new(&config.paths.preferences);
    match &args.command {
        PrefsCommand::Show => {
            let prefs = store.load()?;
            let json = serde_json::to_string_pretty(&prefs)
                .context("failed to format preferences")?;
            println!("{json}");
            Ok(())
        }
        PrefsCommand::SetRoot { dir } => {
            let dir = std::path::absolute(dir)
                .with_context(|| format!("failed to resolve {}", dir.display()))?;
            if !dir.is_dir() {
                warn!("{} is not a directory", dir.display());
            }
            store.save(&Preferences::with_repos_root(&dir))?;
            info!(path = %store.path().display(), "saved repository root {}", dir.display());
            Ok(())
        }
    }
}
