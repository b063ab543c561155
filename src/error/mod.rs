// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                PortError (~24 bytes)
//!                       |
//!   +------+------+-----+-----+------+------+--------+
//!   |      |      |     |     |      |      |        |
//!   v      v      v     v     v      v      v        v
//! Bail   Git   Cfg  Proc   Fs  Prefs Prompt Transfer Io
//!        Box   Box  Box   Box   Box   Box    Box     Box
//!
//! Sub-errors (unboxed internally):
//!   Git      Gix, CommandFailed, RepoNotFound
//!   Config   MissingKey, InvalidValue
//!   Process  ExecutableNotFound, SpawnFailed
//!   Fs       NotFound, NotADirectory, IoError
//!   Prefs    Read, Parse, Write
//!   Prompt   Cancelled, NoChoices, MissingAnswer, Terminal
//!   Transfer CommitNotFound, EmptyExport
//!
//! All variants boxed => PortError fits in 24 bytes.
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`PortError`].
pub type PortResult<T> = std::result::Result<T, PortError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum PortError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// Preference file error.
    #[error("preferences error: {0}")]
    Prefs(#[from] Box<PrefsError>),

    /// Interactive prompt error.
    #[error("prompt error: {0}")]
    Prompt(#[from] Box<PromptError>),

    /// Patch transfer error.
    #[error("transfer error: {0}")]
    Transfer(#[from] Box<TransferError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

impl PortError {
    /// Whether this error is the user backing out of a prompt.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Prompt(e) if matches!(**e, PromptError::Cancelled))
    }
}

/// Create a fatal [`PortError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> PortError {
    PortError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for PortError {
                fn from(err: $error) -> Self {
                    PortError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    FsError => Fs,
    PrefsError => Prefs,
    PromptError => Prompt,
    TransferError => Transfer,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// gix has multiple error types that are converted through this enum.
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),

    /// Repository has no worktree (bare repository).
    #[error("repository has no worktree (bare repository)")]
    BareRepository,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found at the specified path.
    #[error("repository not found: {path}")]
    RepoNotFound { path: String },

    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Path exists but is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// Directory about to be cleared holds something other than patches.
    #[error("refusing to clear '{dir}': '{entry}' is not a patch file")]
    NotPatchDir { dir: String, entry: String },

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Wrap an I/O error raised while touching `path`.
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.display().to_string(),
            source,
        }
    }
}

// --- Preference Errors ---

/// Preference file errors. Both reading and parsing are fatal.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// Preference file could not be read.
    #[error("failed to read preferences '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Preference file is not valid JSON of the expected shape.
    #[error("malformed preferences '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Preference file could not be written.
    #[error("failed to write preferences '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Preferences could not be serialized.
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[source] serde_json::Error),
}

// --- Prompt Errors ---

/// Interactive prompt errors.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The user aborted a prompt.
    #[error("cancelled by user")]
    Cancelled,

    /// A selection prompt had nothing to offer.
    #[error("no choices available for '{stage}'")]
    NoChoices { stage: String },

    /// A stage was reached before the answer it depends on.
    #[error("'{stage}' requires an answer to '{missing}' first")]
    MissingAnswer { stage: String, missing: String },

    /// Terminal interaction failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] dialoguer::Error),
}

// --- Transfer Errors ---

/// Patch transfer errors.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The selected since-commit is not in the fetched commit list.
    #[error("commit {hash} is not in the history of {branch}")]
    CommitNotFound { hash: String, branch: String },

    /// Export produced no patch files.
    #[error("no patches were exported into {}", dir.display())]
    EmptyExport { dir: PathBuf },
}

#[cfg(test)]
mod tests;
