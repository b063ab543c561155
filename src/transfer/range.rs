// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Export range selection.
//!
//! ```text
//! commits (newest first):  c0  c1  c2 ... cN
//! since = ci, i < N   -->  c(i+1)..branch   (ci and newer)
//! since = cN          -->  --root branch    (whole history)
//! ```

use std::fmt;

use crate::error::{PortResult, TransferError};
use crate::git::enumerate::Choice;

/// Revision range handed to `git format-patch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportRange {
    /// Every commit reachable from `branch`, starting at the root.
    FromRoot { branch: String },
    /// Commits after `base` up to and including `branch`.
    After { base: String, branch: String },
}

impl ExportRange {
    /// Pick the range that exports `since` and every newer commit of `branch`.
    ///
    /// `commits` must be in git's newest-first order.
    ///
    /// # Errors
    ///
    /// Returns `TransferError::CommitNotFound` if no commit has value `since`.
    pub fn select(commits: &[Choice], since: &str, branch: &str) -> PortResult<Self> {
        let index = commits
            .iter()
            .position(|commit| commit.value == since)
            .ok_or_else(|| TransferError::CommitNotFound {
                hash: since.to_string(),
                branch: branch.to_string(),
            })?;

        Ok(match commits.get(index + 1) {
            Some(next_older) => Self::After {
                base: next_older.value.clone(),
                branch: branch.to_string(),
            },
            None => Self::FromRoot {
                branch: branch.to_string(),
            },
        })
    }

    /// Revision argument for `git format-patch`.
    #[must_use]
    pub fn revision(&self) -> String {
        match self {
            Self::FromRoot { branch } => branch.clone(),
            Self::After { base, branch } => format!("{base}..{branch}"),
        }
    }
}

impl fmt::Display for ExportRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FromRoot { branch } => write!(f, "{branch} (from root)"),
            Self::After { base, branch } => write!(f, "{base}..{branch}"),
        }
    }
}
