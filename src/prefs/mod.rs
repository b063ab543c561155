// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persisted operator preferences.
//!
//! ```text
//! defaults.json
//! {
//!   "reposRoot": "/home/me/src",
//!   "repos": [ ... ]            (optional)
//! }
//! ```
//!
//! `load` is strict: a missing or malformed file is fatal. `save`
//! overwrites the whole file with 2-space indented JSON.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{PortResult, PrefsError};
use crate::git::enumerate::Choice;

/// The persisted preference record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Last-used directory holding the candidate repositories.
    pub repos_root: PathBuf,
    /// Last repository listing. Readable and writable, never written by a transfer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repos: Option<Vec<Choice<PathBuf>>>,
}

impl Preferences {
    /// A record holding only the repository root.
    pub fn with_repos_root(root: impl Into<PathBuf>) -> Self {
        Self {
            repos_root: root.into(),
            repos: None,
        }
    }
}

/// Reader/writer for the preference file.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the preference file.
    ///
    /// # Errors
    ///
    /// Returns `PrefsError::Read` if the file is missing or unreadable and
    /// `PrefsError::Parse` if it is not a valid preference record.
    pub fn load(&self) -> PortResult<Preferences> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| PrefsError::Read {
            path: self.path.clone(),
            source,
        })?;
        let prefs = serde_json::from_str(&content).map_err(|source| PrefsError::Parse {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "loaded preferences");
        Ok(prefs)
    }

    /// Overwrite the preference file with `prefs`.
    ///
    /// The parent directory is created if needed. Callers that treat the
    /// preference as best-effort may log and drop the error.
    ///
    /// # Errors
    ///
    /// Returns `PrefsError::Write` if the file cannot be written.
    pub fn save(&self, prefs: &Preferences) -> PortResult<()> {
        let json = serde_json::to_string_pretty(prefs).map_err(PrefsError::Serialize)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| PrefsError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        std::fs::write(&self.path, json).map_err(|source| PrefsError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "saved preferences");
        Ok(())
    }
}
