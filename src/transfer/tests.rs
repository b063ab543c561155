// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ExportRange, PatchDir, Transfer, TransferRequest};
use crate::error::{FsError, GitError, PortError, PortResult, TransferError};
use crate::git::backend::{GitMutation, GitQuery};
use crate::git::enumerate::Choice;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn commits(hashes: &[&str]) -> Vec<Choice> {
    hashes
        .iter()
        .map(|h| Choice::new(format!("{h} 2024-01-01 > msg [me]"), (*h).to_string()))
        .collect()
}

fn request(since: &str) -> TransferRequest {
    TransferRequest {
        source_repo: PathBuf::from("/src/a"),
        source_branch: "feature".to_string(),
        dest_repo: PathBuf::from("/src/b"),
        dest_branch: "main".to_string(),
        since_commit: since.to_string(),
        commits: commits(&["c000000", "c111111", "c222222"]),
    }
}

/// Mutation backend recording calls; export writes `files` into the output dir.
struct RecordingGit {
    files: Vec<&'static str>,
    fail_apply: Option<&'static str>,
    calls: RefCell<Vec<String>>,
}

impl RecordingGit {
    fn writing(files: &[&'static str]) -> Self {
        Self {
            files: files.to_vec(),
            fail_apply: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl GitMutation for RecordingGit {
    fn format_patch(&self, _repo: &Path, out_dir: &Path, revision: &str) -> PortResult<()> {
        let before = std::fs::read_dir(out_dir).unwrap().count();
        self.calls
            .borrow_mut()
            .push(format!("format-patch {revision} (dir had {before})"));
        for file in &self.files {
            std::fs::write(out_dir.join(file), "patch").unwrap();
        }
        Ok(())
    }

    fn checkout(&self, _repo: &Path, what: &str) -> PortResult<()> {
        self.calls.borrow_mut().push(format!("checkout {what}"));
        Ok(())
    }

    fn apply_patch(&self, _repo: &Path, patch: &Path) -> PortResult<()> {
        let name = patch.file_name().unwrap().to_string_lossy().into_owned();
        self.calls.borrow_mut().push(format!("am {name}"));
        if self.fail_apply == Some(name.as_str()) {
            return Err(GitError::CommandFailed {
                command: format!("git am --3way {name}"),
                message: "patch does not apply".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Destination sitting on branch `work` with a clean tree.
struct OnWork;

impl GitQuery for OnWork {
    fn current_branch(_path: &Path) -> PortResult<Option<String>> {
        Ok(Some("work".to_string()))
    }

    fn has_uncommitted_changes(_path: &Path) -> PortResult<bool> {
        Ok(false)
    }
}

/// Destination with a detached HEAD and local edits.
struct DetachedDirty;

impl GitQuery for DetachedDirty {
    fn current_branch(_path: &Path) -> PortResult<Option<String>> {
        Ok(None)
    }

    fn has_uncommitted_changes(_path: &Path) -> PortResult<bool> {
        Ok(true)
    }
}

fn patch_dir(temp: &TempDir) -> PatchDir {
    let dir = PatchDir::new(temp.path().join("patches")).unwrap();
    dir.reset().unwrap();
    dir
}

// --- ExportRange ---

#[test]
fn test_range_middle_commit_starts_after_next_older() {
    let range = ExportRange::select(&commits(&["c0", "c1", "c2"]), "c1", "feature").unwrap();
    assert_eq!(
        range,
        ExportRange::After {
            base: "c2".to_string(),
            branch: "feature".to_string()
        }
    );
    assert_eq!(range.revision(), "c2..feature");
}

#[test]
fn test_range_newest_commit_exports_only_itself() {
    let range = ExportRange::select(&commits(&["c0", "c1", "c2"]), "c0", "feature").unwrap();
    assert_eq!(range.revision(), "c1..feature");
}

#[test]
fn test_range_oldest_commit_exports_whole_branch() {
    let range = ExportRange::select(&commits(&["c0", "c1", "c2"]), "c2", "feature").unwrap();
    assert_eq!(
        range,
        ExportRange::FromRoot {
            branch: "feature".to_string()
        }
    );
    assert_eq!(range.revision(), "feature");
    assert_eq!(range.to_string(), "feature (from root)");
}

#[test]
fn test_range_single_commit_branch() {
    let range = ExportRange::select(&commits(&["only"]), "only", "main").unwrap();
    assert_eq!(range.revision(), "main");
}

#[test]
fn test_range_unknown_commit() {
    let err = ExportRange::select(&commits(&["c0"]), "zzzzzzz", "main").unwrap_err();
    assert!(
        matches!(&err, PortError::Transfer(e) if matches!(**e, TransferError::CommitNotFound { .. })),
        "got {err:?}"
    );
    assert_eq!(
        err.to_string(),
        "transfer error: commit zzzzzzz is not in the history of main"
    );
}

// --- PatchDir ---

#[test]
fn test_patch_dir_reset_clears_previous_run() {
    let temp = temp_dir();
    let dir = PatchDir::new(temp.path().join("patches")).unwrap();
    assert!(dir.is_empty().unwrap());

    dir.reset().unwrap();
    std::fs::write(dir.path().join("0001-old.patch"), "old").unwrap();
    std::fs::write(dir.path().join("0002-older.patch"), "old").unwrap();
    assert!(!dir.is_empty().unwrap());

    dir.reset().unwrap();
    assert!(dir.path().is_dir());
    assert!(dir.is_empty().unwrap());
}

#[test]
fn test_patch_dir_reset_refuses_foreign_file() {
    let temp = temp_dir();
    let dir = patch_dir(&temp);
    std::fs::write(dir.path().join("0001-old.patch"), "old").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

    let err = dir.reset().unwrap_err();

    assert!(
        matches!(&err, PortError::Fs(e) if matches!(**e, FsError::NotPatchDir { ref entry, .. } if entry == "notes.txt")),
        "got {err:?}"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("notes.txt")).unwrap(),
        "keep me"
    );
    assert!(dir.path().join("0001-old.patch").exists());
}

#[test]
fn test_patch_dir_reset_refuses_subdirectory() {
    let temp = temp_dir();
    let dir = patch_dir(&temp);
    std::fs::create_dir(dir.path().join("src")).unwrap();
    std::fs::write(dir.path().join("src/main.rs"), "fn main() {}").unwrap();

    let err = dir.reset().unwrap_err();

    assert!(err.to_string().contains("'src' is not a patch file"), "got {err}");
    assert!(dir.path().join("src/main.rs").exists());
}

#[test]
fn test_patch_dir_reset_refuses_regular_file_path() {
    let temp = temp_dir();
    let file = temp.path().join("patches");
    std::fs::write(&file, "not a dir").unwrap();

    let err = PatchDir::new(&file).unwrap().reset().unwrap_err();

    assert!(
        matches!(&err, PortError::Fs(e) if matches!(**e, FsError::NotADirectory(_))),
        "got {err:?}"
    );
    assert!(file.is_file());
}

#[test]
fn test_patch_dir_path_is_absolute() {
    let dir = PatchDir::new("patches").unwrap();
    assert!(dir.path().is_absolute());
    assert!(dir.path().ends_with("patches"));
}

#[test]
fn test_patch_dir_sorts_by_filename_and_skips_directories() {
    let temp = temp_dir();
    let dir = patch_dir(&temp);
    for name in ["0010-j.patch", "0002-b.patch", "0001-a.patch"] {
        std::fs::write(dir.path().join(name), "").unwrap();
    }
    std::fs::create_dir(dir.path().join("0000-dir")).unwrap();

    let names: Vec<_> = dir
        .patches()
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["0001-a.patch", "0002-b.patch", "0010-j.patch"]);
}

// --- Transfer ---

#[test]
fn test_transfer_runs_steps_in_order() {
    let temp = temp_dir();
    let dir = patch_dir(&temp);
    let git = RecordingGit::writing(&["0002-second.patch", "0001-first.patch"]);

    let report = Transfer::new(&git, &dir)
        .with_query::<OnWork>()
        .run(&request("c111111"))
        .unwrap();

    assert_eq!(
        git.calls(),
        [
            "format-patch c222222..feature (dir had 0)",
            "checkout main",
            "am 0001-first.patch",
            "am 0002-second.patch",
            "checkout work",
        ]
    );
    assert_eq!(report.range.revision(), "c222222..feature");
    assert_eq!(report.applied.len(), 2);
    assert_eq!(report.restored, "work");
}

#[test]
fn test_transfer_oldest_commit_exports_from_root() {
    let temp = temp_dir();
    let dir = patch_dir(&temp);
    let git = RecordingGit::writing(&["0001-a.patch"]);

    Transfer::new(&git, &dir)
        .with_query::<OnWork>()
        .run(&request("c222222"))
        .unwrap();

    assert_eq!(git.calls()[0], "format-patch feature (dir had 0)");
}

#[test]
fn test_transfer_detached_head_restores_previous() {
    let temp = temp_dir();
    let dir = patch_dir(&temp);
    let git = RecordingGit::writing(&["0001-a.patch"]);

    let report = Transfer::new(&git, &dir)
        .with_query::<DetachedDirty>()
        .run(&request("c000000"))
        .unwrap();

    assert_eq!(git.calls().last().map(String::as_str), Some("checkout -"));
    assert_eq!(report.restored, "-");
}

#[test]
fn test_transfer_unknown_commit_runs_nothing() {
    let temp = temp_dir();
    let dir = patch_dir(&temp);
    let git = RecordingGit::writing(&["0001-a.patch"]);

    let err = Transfer::new(&git, &dir)
        .with_query::<OnWork>()
        .run(&request("deadbee"))
        .unwrap_err();

    assert!(matches!(err, PortError::Transfer(_)), "got {err:?}");
    assert!(git.calls().is_empty());
}

#[test]
fn test_transfer_empty_export_stops_before_checkout() {
    let temp = temp_dir();
    let dir = patch_dir(&temp);
    let git = RecordingGit::writing(&[]);

    let err = Transfer::new(&git, &dir)
        .with_query::<OnWork>()
        .run(&request("c111111"))
        .unwrap_err();

    assert!(
        matches!(&err, PortError::Transfer(e) if matches!(**e, TransferError::EmptyExport { .. })),
        "got {err:?}"
    );
    assert_eq!(git.calls().len(), 1);
}

#[test]
fn test_transfer_dry_allows_empty_export() {
    let temp = temp_dir();
    let dir = patch_dir(&temp);
    let git = RecordingGit::writing(&[]);

    let report = Transfer::new(&git, &dir)
        .dry(true)
        .with_query::<OnWork>()
        .run(&request("c111111"))
        .unwrap();

    assert!(report.applied.is_empty());
    assert_eq!(
        git.calls(),
        [
            "format-patch c222222..feature (dir had 0)",
            "checkout main",
            "checkout work",
        ]
    );
}

#[test]
fn test_transfer_failed_apply_aborts_without_restore() {
    let temp = temp_dir();
    let dir = patch_dir(&temp);
    let mut git = RecordingGit::writing(&["0001-a.patch", "0002-b.patch", "0003-c.patch"]);
    git.fail_apply = Some("0002-b.patch");

    let err = Transfer::new(&git, &dir)
        .with_query::<OnWork>()
        .run(&request("c111111"))
        .unwrap_err();

    assert!(matches!(err, PortError::Git(_)), "got {err:?}");
    assert_eq!(
        git.calls(),
        [
            "format-patch c222222..feature (dir had 0)",
            "checkout main",
            "am 0001-a.patch",
            "am 0002-b.patch",
        ]
    );
}
