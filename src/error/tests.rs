// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, GitError, PortError, PortResult, PromptError, TransferError, bail_out};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "paths".to_string(),
        key: "patches".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"missing required config key 'patches' in section '[paths]'"
    );
}

#[test]
fn test_git_error_display() {
    let err: PortError = GitError::CommandFailed {
        command: "git checkout main".to_string(),
        message: "error: pathspec 'main' did not match".to_string(),
    }
    .into();
    insta::assert_snapshot!(
        err.to_string(),
        @"git error: git command failed: git checkout main - error: pathspec 'main' did not match"
    );
}

#[test]
fn test_transfer_error_display() {
    let err = TransferError::CommitNotFound {
        hash: "abc1234".to_string(),
        branch: "feature".to_string(),
    };
    assert_eq!(err.to_string(), "commit abc1234 is not in the history of feature");
}

#[test]
fn test_cancelled_detection() {
    let cancelled: PortError = PromptError::Cancelled.into();
    assert!(cancelled.is_cancelled());

    let other: PortError = PromptError::NoChoices {
        stage: "source branch".to_string(),
    }
    .into();
    assert!(!other.is_cancelled());
    assert!(!bail_out("boom").is_cancelled());
}

#[test]
fn test_port_error_size() {
    // Bailed (Box<str>) is 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<PortError>();
    assert!(size <= 24, "PortError is {size} bytes, expected <= 24");
}

#[test]
fn test_port_result_size() {
    let size = std::mem::size_of::<PortResult<()>>();
    assert!(size <= 24, "PortResult<()> is {size} bytes, expected <= 24");
}
