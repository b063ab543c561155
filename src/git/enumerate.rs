// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository, branch and commit enumeration.
//!
//! ```text
//! root/           list_repositories  --> [Choice<PathBuf>]  (subdirectories)
//! git branch      parse_branch_list  --> [Choice]           ("* " / "  " stripped)
//! git log         parse_commit_list  --> [Choice]           (value = 7-char hash)
//! ```
//!
//! Commit order is git's (newest first). The transfer relies on it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::backend::GitListing;
use crate::error::{FsError, PortResult};

/// Length of the short hash taken from the start of a log line.
pub const SHORT_HASH_LEN: usize = 7;

/// Width of the marker git prints before each branch name.
const BRANCH_MARKER_LEN: usize = 2;

/// A selectable item: a human-readable label and the value it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice<V = String> {
    pub title: String,
    pub value: V,
}

impl<V> Choice<V> {
    pub fn new(title: impl Into<String>, value: V) -> Self {
        Self {
            title: title.into(),
            value,
        }
    }
}

impl<V> fmt::Display for Choice<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

fn non_blank_lines(output: &str) -> impl Iterator<Item = &str> {
    output.split(['\n', '\r']).filter(|line| !line.is_empty())
}

/// Parse `git branch` output into branch choices.
#[must_use]
pub fn parse_branch_list(output: &str) -> Vec<Choice> {
    non_blank_lines(output)
        .map(|line| {
            let name: String = line.chars().skip(BRANCH_MARKER_LEN).collect();
            Choice::new(name.clone(), name)
        })
        .collect()
}

/// Parse `git log` output (see [`super::backend::LOG_FORMAT`]) into commit choices.
#[must_use]
pub fn parse_commit_list(output: &str) -> Vec<Choice> {
    non_blank_lines(output)
        .map(|line| Choice::new(line, line.chars().take(SHORT_HASH_LEN).collect::<String>()))
        .collect()
}

/// List the immediate subdirectories of `root` as repository candidates.
///
/// Entries are not checked for being repositories; a bad pick surfaces when
/// git runs against it. Values are absolute paths, sorted by name.
///
/// # Errors
///
/// Returns an `FsError` if `root` does not exist, is not a directory, or
/// cannot be read.
pub fn list_repositories(root: &Path) -> PortResult<Vec<Choice<PathBuf>>> {
    let root = std::path::absolute(root).map_err(|e| FsError::io(root, e))?;
    if !root.exists() {
        return Err(FsError::NotFound(root.display().to_string()).into());
    }
    if !root.is_dir() {
        return Err(FsError::NotADirectory(root.display().to_string()).into());
    }

    let mut repos = Vec::new();
    for entry in std::fs::read_dir(&root).map_err(|e| FsError::io(&root, e))? {
        let entry = entry.map_err(|e| FsError::io(&root, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let title = entry.file_name().to_string_lossy().into_owned();
        repos.push(Choice::new(title, path));
    }

    repos.sort_by(|a, b| a.title.cmp(&b.title));
    debug!(root = %root.display(), count = repos.len(), "listed repositories");
    Ok(repos)
}

/// Source of the choices the prompt pipeline offers.
pub trait Enumerator {
    /// Repository candidates under `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` cannot be listed.
    fn list_repositories(&self, root: &Path) -> PortResult<Vec<Choice<PathBuf>>>;

    /// Branches of `repo`.
    ///
    /// # Errors
    ///
    /// Returns an error if the branch listing fails.
    fn list_branches(&self, repo: &Path) -> PortResult<Vec<Choice>>;

    /// Commits of `branch` in `repo`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the log listing fails.
    fn list_commits(&self, repo: &Path, branch: &str) -> PortResult<Vec<Choice>>;
}

/// [`Enumerator`] backed by the filesystem and a git listing backend.
#[derive(Debug, Clone, Copy)]
pub struct GitEnumerator<'a, L> {
    git: &'a L,
}

impl<'a, L: GitListing> GitEnumerator<'a, L> {
    pub const fn new(git: &'a L) -> Self {
        Self { git }
    }
}

impl<L: GitListing> Enumerator for GitEnumerator<'_, L> {
    fn list_repositories(&self, root: &Path) -> PortResult<Vec<Choice<PathBuf>>> {
        list_repositories(root)
    }

    fn list_branches(&self, repo: &Path) -> PortResult<Vec<Choice>> {
        let branches = parse_branch_list(&self.git.branch_list(repo)?);
        debug!(repo = %repo.display(), count = branches.len(), "listed branches");
        Ok(branches)
    }

    fn list_commits(&self, repo: &Path, branch: &str) -> PortResult<Vec<Choice>> {
        let commits = parse_commit_list(&self.git.commit_log(repo, branch)?);
        debug!(repo = %repo.display(), branch, count = commits.len(), "listed commits");
        Ok(commits)
    }
}
