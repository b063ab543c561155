// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for patchport.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. patchport.toml next to the executable
//! 3. patchport.toml in the current directory
//! 4. --config FILE (repeatable)
//! 5. PATCHPORT_* env vars
//! 6. CLI overrides (--prefs, --patches, --dry, log levels)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! PATCHPORT_GLOBAL__DRY=true         → global.dry = true
//! PATCHPORT_PATHS__PATCHES=/tmp/p    → paths.patches = "/tmp/p"
//! PATCHPORT_GIT__PROGRAM=/opt/git    → git.program = "/opt/git"
//! ```
//!
//! The preference file and the patch directory default to `defaults.json`
//! and `patches/` beside the executable.

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

use loader::ConfigLoader;
use types::{GitConfig, GlobalConfig, PathsConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Preference file and patch directory locations.
    pub paths: PathsConfig,
    /// Git invocation settings.
    pub git: GitConfig,
}

impl Config {
    /// Loader for the standard lookup chain with `explicit` files on top.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use patchport::config::Config;
    ///
    /// let config = Config::layered(&[])
    ///     .set("global.dry", true)?
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn layered(explicit: &[PathBuf]) -> ConfigLoader {
        ConfigLoader::layered(Self::executable_dir().as_deref(), explicit)
    }

    #[cfg(test)]
    pub(crate) fn parse(content: &str) -> Result<Self> {
        ConfigLoader::new().add_toml_str(content).build()
    }

    /// Directory holding the running executable.
    #[must_use]
    pub fn executable_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
    }

    /// Resolve relative paths and validate configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a relative path cannot be resolved.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.paths.resolve(Self::executable_dir().as_deref())
    }

    /// Format configuration options for display, one `key = value` per line.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let fmt = |p: &Path| p.display().to_string();

        let mut options = BTreeMap::new();
        options.insert("global.dry", self.global.dry.to_string());
        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file", fmt(&self.global.log_file));
        options.insert(
            "paths.base",
            self.paths.base.as_deref().map(fmt).unwrap_or_default(),
        );
        options.insert("paths.preferences", fmt(&self.paths.preferences));
        options.insert("paths.patches", fmt(&self.paths.patches));
        options.insert("git.program", self.git.program.clone());
        options.insert("git.date_format", self.git.date_format.clone());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
