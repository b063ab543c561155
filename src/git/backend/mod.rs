// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery    (read, in-process) --> GixBackend   (pure Rust gix)
//! GitListing  (read, CLI text)   --> ShellBackend (git branch / git log)
//! GitMutation (write)            --> ShellBackend (format-patch / checkout / am)
//!                                --> DryRunBackend (logs instead of running)
//! ```
//!
//! Listings go through the CLI because their exact text output is what the
//! enumerator parses.

use crate::error::{GitError, GixError, PortResult, ProcessError};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, trace};

/// `git log` pretty format: `<short-hash> <date> > <subject> <decorations> [<author>]`.
pub const LOG_FORMAT: &str = "%h %ad > %s%d [%an]";

// --- Query Trait (Read-only, in-process) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or head resolution fails.
    fn current_branch(path: &Path) -> PortResult<Option<String>>;

    /// Check for uncommitted changes (staged, unstaged, or untracked files).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or status check fails.
    fn has_uncommitted_changes(path: &Path) -> PortResult<bool>;
}

// --- Listing Trait (Read-only, CLI output) ---

/// Raw text listings consumed by the enumerator.
pub trait GitListing {
    /// Output of `git branch` in `repo`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git exits non-zero.
    fn branch_list(&self, repo: &Path) -> PortResult<String>;

    /// Output of `git log` for `branch` in `repo`, one commit per line.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git exits non-zero.
    fn commit_log(&self, repo: &Path, branch: &str) -> PortResult<String>;
}

// --- Mutation Trait (Write operations) ---

/// Operations that write patches or change a working copy.
pub trait GitMutation {
    /// Export `revision` from `repo` as patch files into `out_dir`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git format-patch` fails.
    fn format_patch(&self, repo: &Path, out_dir: &Path, revision: &str) -> PortResult<()>;

    /// Checkout a branch, or `-` for the previously checked-out one.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the checkout fails.
    fn checkout(&self, repo: &Path, what: &str) -> PortResult<()>;

    /// Apply one mailbox patch with three-way merge fallback.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the patch cannot be applied.
    fn apply_patch(&self, repo: &Path, patch: &Path) -> PortResult<()>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn current_branch(path: &Path) -> PortResult<Option<String>> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn has_uncommitted_changes(path: &Path) -> PortResult<bool> {
        use gix::status::UntrackedFiles;

        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        if repo.workdir().is_none() {
            return Err(GitError::Gix(GixError::BareRepository).into());
        }

        let has_changes = repo
            .status(gix::progress::Discard)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to prepare status check".to_string(),
            })?
            .untracked_files(UntrackedFiles::Files)
            .into_iter(None)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to check repository status".to_string(),
            })?
            .next()
            .is_some();

        Ok(has_changes)
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using the git CLI.
#[derive(Debug, Clone)]
pub struct ShellBackend {
    program: PathBuf,
    date_format: String,
}

impl Default for ShellBackend {
    fn default() -> Self {
        Self::new("git")
    }
}

impl ShellBackend {
    /// Backend invoking `program` as-is (resolved through `PATH` at spawn time).
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            date_format: "short".to_string(),
        }
    }

    /// Backend invoking the absolute path `which` finds for `program`.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if `program` is not on `PATH`.
    pub fn locate(program: &str) -> PortResult<Self> {
        let path = which::which(program).map_err(|_| ProcessError::ExecutableNotFound {
            name: program.to_string(),
        })?;
        debug!(program, path = %path.display(), "located git");
        Ok(Self::new(path))
    }

    /// Use `format` for `git log --date=`.
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Execute a git command in `cwd` and return its untrimmed stdout.
    ///
    /// Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`. Blocks until
    /// git exits; there is no timeout.
    pub(crate) fn git_command<I, S>(&self, args: I, cwd: &Path) -> PortResult<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args
            .into_iter()
            .map(|arg| arg.as_ref().to_os_string())
            .collect();
        let command = display_command(&args);

        if !cwd.is_dir() {
            return Err(GitError::RepoNotFound {
                path: cwd.display().to_string(),
            }
            .into());
        }

        debug!(cwd = %cwd.display(), "{command}");
        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|source| ProcessError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(GitError::CommandFailed { command, message }.into());
        }

        trace!(%command, %stdout, "git output");
        Ok(stdout)
    }
}

fn display_command(args: &[OsString]) -> String {
    let mut command = String::from("git");
    for arg in args {
        command.push(' ');
        command.push_str(&arg.to_string_lossy());
    }
    command
}

impl GitListing for ShellBackend {
    fn branch_list(&self, repo: &Path) -> PortResult<String> {
        self.git_command(["branch", "--no-color"], repo)
    }

    fn commit_log(&self, repo: &Path, branch: &str) -> PortResult<String> {
        let pretty = format!("--pretty=format:{LOG_FORMAT}");
        let date = format!("--date={}", self.date_format);
        self.git_command(
            ["log", "--no-color", pretty.as_str(), date.as_str(), branch, "--"],
            repo,
        )
    }
}

impl GitMutation for ShellBackend {
    fn format_patch(&self, repo: &Path, out_dir: &Path, revision: &str) -> PortResult<()> {
        let written = self.git_command(
            [
                OsStr::new("format-patch"),
                OsStr::new("-o"),
                out_dir.as_os_str(),
                OsStr::new("--root"),
                OsStr::new(revision),
            ],
            repo,
        )?;
        debug!(count = written.lines().count(), "format-patch wrote patches");
        Ok(())
    }

    fn checkout(&self, repo: &Path, what: &str) -> PortResult<()> {
        self.git_command(
            ["-c", "advice.detachedHead=false", "checkout", "-q", what],
            repo,
        )?;
        Ok(())
    }

    fn apply_patch(&self, repo: &Path, patch: &Path) -> PortResult<()> {
        self.git_command(
            [OsStr::new("am"), OsStr::new("--3way"), patch.as_os_str()],
            repo,
        )?;
        Ok(())
    }
}

// --- DryRunBackend (logs mutations) ---

/// Delegates listings to `inner` and logs mutations without running them.
#[derive(Debug, Clone, Copy)]
pub struct DryRunBackend<'a, L> {
    inner: &'a L,
}

impl<'a, L> DryRunBackend<'a, L> {
    pub const fn new(inner: &'a L) -> Self {
        Self { inner }
    }
}

impl<L: GitListing> GitListing for DryRunBackend<'_, L> {
    fn branch_list(&self, repo: &Path) -> PortResult<String> {
        self.inner.branch_list(repo)
    }

    fn commit_log(&self, repo: &Path, branch: &str) -> PortResult<String> {
        self.inner.commit_log(repo, branch)
    }
}

impl<L> GitMutation for DryRunBackend<'_, L> {
    fn format_patch(&self, repo: &Path, out_dir: &Path, revision: &str) -> PortResult<()> {
        info!(
            repo = %repo.display(),
            "[dry] git format-patch -o {} --root {revision}",
            out_dir.display()
        );
        Ok(())
    }

    fn checkout(&self, repo: &Path, what: &str) -> PortResult<()> {
        info!(repo = %repo.display(), "[dry] git checkout {what}");
        Ok(())
    }

    fn apply_patch(&self, repo: &Path, patch: &Path) -> PortResult<()> {
        info!(repo = %repo.display(), "[dry] git am --3way {}", patch.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests;
