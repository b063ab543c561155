// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The six-stage question sequence.
//!
//! ```text
//! ReposRoot ──> SourceRepo ──> SourceBranch ──> DestRepo ──> DestBranch ──> SinceCommit
//!  (text)       (repos)        (git branch)     (repos)      (git branch)   (git log)
//! ```
//!
//! Stages run strictly in order. Each one reads what earlier stages
//! answered; the first cancel ends the run.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::Prompter;
use crate::error::{FsError, PortResult, PromptError, bail_out};
use crate::git::enumerate::{Choice, Enumerator};
use crate::prefs::{PreferenceStore, Preferences};
use crate::transfer::TransferRequest;

/// One question of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ReposRoot,
    SourceRepo,
    SourceBranch,
    DestRepo,
    DestBranch,
    SinceCommit,
}

impl Stage {
    /// Every stage, in the order they are asked.
    pub const ALL: [Self; 6] = [
        Self::ReposRoot,
        Self::SourceRepo,
        Self::SourceBranch,
        Self::DestRepo,
        Self::DestBranch,
        Self::SinceCommit,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReposRoot => "repos root",
            Self::SourceRepo => "source repo",
            Self::SourceBranch => "source branch",
            Self::DestRepo => "destination repo",
            Self::DestBranch => "destination branch",
            Self::SinceCommit => "since commit",
        }
    }

    /// Prompt text shown to the user.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ReposRoot => "Directory containing the repositories",
            Self::SourceRepo => "From Repo",
            Self::SourceBranch => "From Branch",
            Self::DestRepo => "To Repo",
            Self::DestBranch => "To Branch",
            Self::SinceCommit => "Since Commit",
        }
    }
}

/// Answers collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    pub repos_root: Option<PathBuf>,
    /// Repository candidates found under `repos_root`.
    pub repos: Vec<Choice<PathBuf>>,
    pub source_repo: Option<PathBuf>,
    pub source_branch: Option<String>,
    pub dest_repo: Option<PathBuf>,
    pub dest_branch: Option<String>,
    pub since_commit: Option<String>,
    /// Commits offered at the since stage, newest first.
    pub commits: Vec<Choice>,
}

fn require<T: ?Sized>(value: Option<&T>, stage: Stage, missing: Stage) -> PortResult<&T> {
    value.ok_or_else(|| {
        PromptError::MissingAnswer {
            stage: stage.name().to_string(),
            missing: missing.name().to_string(),
        }
        .into()
    })
}

impl Answers {
    /// Turn a complete set of answers into a transfer request.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::MissingAnswer` naming the first unanswered stage.
    pub fn into_request(self) -> PortResult<TransferRequest> {
        fn take<T>(value: Option<T>, missing: Stage) -> PortResult<T> {
            value.ok_or_else(|| {
                PromptError::MissingAnswer {
                    stage: "transfer".to_string(),
                    missing: missing.name().to_string(),
                }
                .into()
            })
        }

        Ok(TransferRequest {
            source_repo: take(self.source_repo, Stage::SourceRepo)?,
            source_branch: take(self.source_branch, Stage::SourceBranch)?,
            dest_repo: take(self.dest_repo, Stage::DestRepo)?,
            dest_branch: take(self.dest_branch, Stage::DestBranch)?,
            since_commit: take(self.since_commit, Stage::SinceCommit)?,
            commits: self.commits,
        })
    }
}

/// Asks every [`Stage`] in order and assembles a [`TransferRequest`].
pub struct PromptPipeline<'a, P, E> {
    prompter: &'a mut P,
    enumerator: &'a E,
    prefs: &'a PreferenceStore,
}

impl<'a, P: Prompter, E: Enumerator> PromptPipeline<'a, P, E> {
    pub const fn new(prompter: &'a mut P, enumerator: &'a E, prefs: &'a PreferenceStore) -> Self {
        Self {
            prompter,
            enumerator,
            prefs,
        }
    }

    /// Run all stages.
    ///
    /// The preference file is read before the first prompt. The root the
    /// user submits is made absolute and saved back; a failed save is only
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns a `PrefsError` if the preference file cannot be loaded,
    /// `PromptError::Cancelled` if the user backs out of any prompt,
    /// `PromptError::NoChoices` if a selection would be empty, and any
    /// enumeration error.
    pub fn run(&mut self) -> PortResult<TransferRequest> {
        let saved = self.prefs.load()?;
        let mut answers = Answers {
            repos_root: Some(saved.repos_root),
            ..Answers::default()
        };

        for stage in Stage::ALL {
            self.ask(stage, &mut answers)?;
        }
        answers.into_request()
    }

    fn ask(&mut self, stage: Stage, answers: &mut Answers) -> PortResult<()> {
        match stage {
            Stage::ReposRoot => {
                let default = answers
                    .repos_root
                    .as_ref()
                    .map(|root| root.display().to_string());
                let text = self
                    .prompter
                    .input(stage.message(), default.as_deref())?
                    .ok_or(PromptError::Cancelled)?;
                let typed = PathBuf::from(text);
                let root = std::path::absolute(&typed).map_err(|e| FsError::io(&typed, e))?;

                if let Err(e) = self.prefs.save(&Preferences::with_repos_root(&root)) {
                    warn!("could not save preferences: {e}");
                }
                answers.repos = self.enumerator.list_repositories(&root)?;
                answers.repos_root = Some(root);
            }
            Stage::SourceRepo => {
                let repo = self.pick(stage, &answers.repos)?.value.clone();
                answers.source_repo = Some(repo);
            }
            Stage::SourceBranch => {
                let repo = require(answers.source_repo.as_deref(), stage, Stage::SourceRepo)?;
                let branch = self.pick_branch(stage, repo)?;
                answers.source_branch = Some(branch);
            }
            Stage::DestRepo => {
                let repo = self.pick(stage, &answers.repos)?.value.clone();
                answers.dest_repo = Some(repo);
            }
            Stage::DestBranch => {
                let repo = require(answers.dest_repo.as_deref(), stage, Stage::DestRepo)?;
                let branch = self.pick_branch(stage, repo)?;
                answers.dest_branch = Some(branch);
            }
            Stage::SinceCommit => {
                let repo = require(answers.source_repo.as_deref(), stage, Stage::SourceRepo)?;
                let branch =
                    require(answers.source_branch.as_deref(), stage, Stage::SourceBranch)?;
                let commits = self.enumerator.list_commits(repo, branch)?;
                let since = self.pick(stage, &commits)?.value.clone();
                answers.since_commit = Some(since);
                answers.commits = commits;
            }
        }
        debug!(stage = stage.name(), "answered");
        Ok(())
    }

    fn pick_branch(&mut self, stage: Stage, repo: &Path) -> PortResult<String> {
        let branches = self.enumerator.list_branches(repo)?;
        Ok(self.pick(stage, &branches)?.value.clone())
    }

    fn pick<'c, V>(&mut self, stage: Stage, choices: &'c [Choice<V>]) -> PortResult<&'c Choice<V>> {
        if choices.is_empty() {
            return Err(PromptError::NoChoices {
                stage: stage.name().to_string(),
            }
            .into());
        }

        let titles: Vec<String> = choices.iter().map(|c| c.title.clone()).collect();
        let index = self
            .prompter
            .select(stage.message(), &titles)?
            .ok_or(PromptError::Cancelled)?;
        choices.get(index).ok_or_else(|| {
            bail_out(format!(
                "selection {index} out of range for '{}' ({} choices)",
                stage.name(),
                choices.len()
            ))
        })
    }
}
