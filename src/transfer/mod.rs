// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Patch transfer.
//!
//! ```text
//! source repo                      patch dir                 dest repo
//! git format-patch --root <range> ──> 0001-*.patch ──> git checkout <branch>
//!                                     0002-*.patch ──> git am --3way (each)
//!                                                  ──> git checkout <previous>
//! ```
//!
//! Every step blocks on git and the first failure aborts the rest. Nothing
//! is rolled back: a failed `git am` leaves the destination mid-apply.

mod patch_dir;
mod range;

#[cfg(test)]
mod tests;

pub use patch_dir::PatchDir;
pub use range::ExportRange;

use indicatif::{ProgressBar, ProgressStyle};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::error::{PortResult, TransferError};
use crate::git::backend::{GitMutation, GitQuery, GixBackend};
use crate::git::enumerate::Choice;

/// Everything the transfer needs, as collected by the prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub source_repo: PathBuf,
    pub source_branch: String,
    pub dest_repo: PathBuf,
    pub dest_branch: String,
    /// Short hash of the oldest commit to copy.
    pub since_commit: String,
    /// Commit list of the source branch, newest first, as offered in the prompt.
    pub commits: Vec<Choice>,
}

/// What a finished transfer did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReport {
    pub range: ExportRange,
    /// Patch files applied (or planned, in dry mode) in order.
    pub applied: Vec<PathBuf>,
    /// Branch the destination was returned to (`-` when HEAD was detached).
    pub restored: String,
}

/// Pre-validated progress bar style for patch application.
fn bar_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        })
        .clone()
}

/// Runs one transfer against a mutation backend.
///
/// `Q` answers which branch the destination is on before the checkout;
/// it defaults to the gix backend.
pub struct Transfer<'a, G, Q = GixBackend> {
    git: &'a G,
    patches: &'a PatchDir,
    dry: bool,
    _query: PhantomData<Q>,
}

impl<'a, G: GitMutation> Transfer<'a, G> {
    pub const fn new(git: &'a G, patches: &'a PatchDir) -> Self {
        Self {
            git,
            patches,
            dry: false,
            _query: PhantomData,
        }
    }
}

impl<'a, G: GitMutation, Q: GitQuery> Transfer<'a, G, Q> {
    /// Answer branch and status queries with `Q2` instead.
    #[must_use]
    pub fn with_query<Q2: GitQuery>(self) -> Transfer<'a, G, Q2> {
        Transfer {
            git: self.git,
            patches: self.patches,
            dry: self.dry,
            _query: PhantomData,
        }
    }

    /// Dry mode: `git` is expected to only log, so an empty export is not an error.
    #[must_use]
    pub const fn dry(mut self, dry: bool) -> Self {
        self.dry = dry;
        self
    }

    /// Export, check out, apply and restore.
    ///
    /// The patch directory is expected to have been reset beforehand.
    ///
    /// # Errors
    ///
    /// Returns `TransferError::CommitNotFound` if the since-commit is not in
    /// the request's commit list, `TransferError::EmptyExport` if export
    /// wrote nothing, and the first `GitError` any git step raises.
    pub fn run(&self, request: &TransferRequest) -> PortResult<TransferReport> {
        let range = ExportRange::select(
            &request.commits,
            &request.since_commit,
            &request.source_branch,
        )?;
        info!(
            source = %request.source_repo.display(),
            "exporting {range} into {}",
            self.patches.path().display()
        );
        self.git
            .format_patch(&request.source_repo, self.patches.path(), &range.revision())?;

        let patches = self.patches.patches()?;
        if patches.is_empty() && !self.dry {
            return Err(TransferError::EmptyExport {
                dir: self.patches.path().to_path_buf(),
            }
            .into());
        }
        debug!(count = patches.len(), "exported patches");

        let restore = Self::previous_branch(&request.dest_repo)?;

        info!(dest = %request.dest_repo.display(), "checking out {}", request.dest_branch);
        self.git.checkout(&request.dest_repo, &request.dest_branch)?;

        let pb = if self.dry {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(patches.len() as u64)
        };
        pb.set_style(bar_style());
        for patch in &patches {
            let name = patch
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            pb.set_message(name.clone());
            pb.suspend(|| info!("applying {name}"));
            self.git.apply_patch(&request.dest_repo, patch)?;
            pb.inc(1);
        }
        pb.finish_and_clear();

        info!(dest = %request.dest_repo.display(), "restoring {restore}");
        self.git.checkout(&request.dest_repo, &restore)?;

        info!(count = patches.len(), "transfer complete");
        Ok(TransferReport {
            range,
            applied: patches,
            restored: restore,
        })
    }

    /// Branch to return the destination to after applying.
    fn previous_branch(dest: &Path) -> PortResult<String> {
        match Q::has_uncommitted_changes(dest) {
            Ok(true) => warn!(
                dest = %dest.display(),
                "destination has uncommitted changes; checkout may fail"
            ),
            Ok(false) => {}
            Err(e) => debug!(dest = %dest.display(), "could not check status: {e}"),
        }

        Ok(Q::current_branch(dest)?.unwrap_or_else(|| {
            debug!(dest = %dest.display(), "HEAD is detached, restoring with '-'");
            "-".to_string()
        }))
    }
}
