// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types.
//!
//! ```text
//! Config: GlobalConfig, PathsConfig, GitConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Plan the transfer and log git commands without running mutating ones.
    pub dry: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; empty disables the file log.
    pub log_file: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::new(),
        }
    }
}

impl GlobalConfig {
    /// Log file path, if file logging is enabled.
    #[must_use]
    pub fn log_file(&self) -> Option<&Path> {
        (!self.log_file.as_os_str().is_empty()).then_some(self.log_file.as_path())
    }
}

/// Filesystem locations used by a run.
///
/// Relative paths resolve against `base`, which defaults to the directory
/// holding the executable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory relative paths resolve against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<PathBuf>,
    /// Preference file holding the last-used repository root.
    pub preferences: PathBuf,
    /// Scratch directory receiving exported patches.
    pub patches: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            base: None,
            preferences: PathBuf::from("defaults.json"),
            patches: PathBuf::from("patches"),
        }
    }
}

impl PathsConfig {
    /// Resolve relative paths against `base` (or `fallback_base` if unset).
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if neither a base nor a fallback
    /// directory is available while a relative path needs resolving.
    pub fn resolve(&mut self, fallback_base: Option<&Path>) -> Result<()> {
        let base = self
            .base
            .clone()
            .or_else(|| fallback_base.map(Path::to_path_buf));

        for path in [&mut self.preferences, &mut self.patches] {
            if path.is_relative() {
                let base = base.as_ref().ok_or_else(|| ConfigError::MissingKey {
                    section: "paths".to_string(),
                    key: "base".to_string(),
                })?;
                *path = base.join(&*path);
            }
        }

        if self.base.is_none() {
            self.base = base;
        }
        Ok(())
    }
}

/// Git invocation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Git executable name or path.
    pub program: String,
    /// Value for `git log --date=`.
    pub date_format: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            date_format: "short".to_string(),
        }
    }
}
