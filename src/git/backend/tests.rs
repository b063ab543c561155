// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{DryRunBackend, GitListing, GitMutation, GitQuery, GixBackend, ShellBackend};
use crate::error::{GitError, PortError};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn run_git(args: &[&str], cwd: &Path) {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Repo on branch `main` with a single commit touching `file.txt`.
fn init_repo_with_commit(path: &Path) {
    run_git(&["init", "--quiet", "-b", "main"], path);
    run_git(&["config", "user.email", "test@example.com"], path);
    run_git(&["config", "user.name", "Test"], path);
    std::fs::write(path.join("file.txt"), "one\n").unwrap();
    run_git(&["add", "file.txt"], path);
    run_git(&["commit", "--quiet", "-m", "first"], path);
}

#[test]
fn test_gix_current_branch_and_detached() {
    let temp = temp_dir();
    init_repo_with_commit(temp.path());
    run_git(&["checkout", "--quiet", "-b", "topic"], temp.path());

    assert_eq!(
        GixBackend::current_branch(temp.path()).unwrap().as_deref(),
        Some("topic")
    );

    run_git(&["checkout", "--quiet", "--detach"], temp.path());
    assert_eq!(GixBackend::current_branch(temp.path()).unwrap(), None);
}

#[test]
fn test_gix_uncommitted_changes() {
    let temp = temp_dir();
    init_repo_with_commit(temp.path());
    assert!(!GixBackend::has_uncommitted_changes(temp.path()).unwrap());

    std::fs::write(temp.path().join("file.txt"), "changed\n").unwrap();
    assert!(GixBackend::has_uncommitted_changes(temp.path()).unwrap());
}

#[test]
fn test_shell_branch_list_keeps_marker_prefix() {
    let temp = temp_dir();
    init_repo_with_commit(temp.path());
    run_git(&["branch", "dev"], temp.path());

    let output = ShellBackend::default().branch_list(temp.path()).unwrap();
    // The first line is not trimmed: both markers are preserved for parsing.
    assert_eq!(output, "  dev\n* main\n");
}

#[test]
fn test_shell_commit_log_format() {
    let temp = temp_dir();
    init_repo_with_commit(temp.path());

    let output = ShellBackend::default()
        .commit_log(temp.path(), "main")
        .unwrap();
    let line = output.lines().next().unwrap();
    assert!(line.ends_with(" > first (HEAD -> main) [Test]"), "got {line:?}");
    // "<hash> <yyyy-mm-dd> > ..."
    let mut parts = line.split(' ');
    assert!(parts.next().is_some_and(|h| h.len() >= 7));
    assert!(parts.next().is_some_and(|d| d.len() == 10));
}

#[test]
fn test_shell_command_failure_carries_stderr() {
    let temp = temp_dir();
    init_repo_with_commit(temp.path());

    let err = ShellBackend::default()
        .checkout(temp.path(), "does-not-exist")
        .unwrap_err();
    match err {
        PortError::Git(e) => match *e {
            GitError::CommandFailed { command, message } => {
                assert!(command.contains("checkout -q does-not-exist"), "{command}");
                assert!(message.contains("does-not-exist"), "{message}");
            }
            other => panic!("unexpected git error: {other:?}"),
        },
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_shell_missing_repo_path() {
    let temp = temp_dir();
    let err = ShellBackend::default()
        .branch_list(&temp.path().join("missing"))
        .unwrap_err();
    assert!(
        matches!(&err, PortError::Git(e) if matches!(**e, GitError::RepoNotFound { .. })),
        "got {err:?}"
    );
}

#[test]
fn test_shell_locate_unknown_program() {
    let err = ShellBackend::locate("patchport-no-such-git-binary").unwrap_err();
    assert!(err.to_string().contains("not in PATH"), "got {err}");
}

#[test]
fn test_dry_run_does_not_mutate() {
    let temp = temp_dir();
    init_repo_with_commit(temp.path());
    run_git(&["branch", "dev"], temp.path());
    let out = temp.path().join("patches");
    std::fs::create_dir(&out).unwrap();

    let shell = ShellBackend::default();
    let dry = DryRunBackend::new(&shell);
    dry.format_patch(temp.path(), &out, "main").unwrap();
    dry.checkout(temp.path(), "dev").unwrap();

    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
    assert_eq!(
        GixBackend::current_branch(temp.path()).unwrap().as_deref(),
        Some("main")
    );
    // Listings still hit git.
    assert!(dry.branch_list(temp.path()).unwrap().contains("dev"));
}
