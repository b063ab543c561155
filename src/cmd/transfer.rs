// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The interactive transfer command.
//!
//! ```text
//! reset patch dir --> locate git --> prompts --> Transfer::run
//!                                       |
//!                          GitEnumerator(ShellBackend)
//! ```

use anyhow::Context;
use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::git::backend::{DryRunBackend, ShellBackend};
use crate::git::enumerate::GitEnumerator;
use crate::prefs::PreferenceStore;
use crate::prompt::TerminalPrompter;
use crate::prompt::pipeline::PromptPipeline;
use crate::transfer::{PatchDir, Transfer, TransferReport, TransferRequest};

/// Run the prompts and copy the chosen commit range.
///
/// With `dry_run`, branches and commits are still listed but format-patch,
/// checkout and am are only logged.
///
/// # Errors
///
/// Returns an error if git cannot be found, the preference file is missing
/// or malformed, the user cancels a prompt, or any git step fails.
pub fn run_transfer_command(config: &Config, dry_run: bool) -> Result<()> {
    let patches = PatchDir::new(&config.paths.patches)?;
    patches
        .reset()
        .with_context(|| format!("failed to prepare {}", patches.path().display()))?;

    let git = ShellBackend::locate(&config.git.program)?
        .with_date_format(config.git.date_format.as_str());
    debug!(git = %git.program().display(), dry_run, "starting transfer");

    let store = PreferenceStore::new(&config.paths.preferences);
    let enumerator = GitEnumerator::new(&git);
    let mut prompter = TerminalPrompter;
    let request = PromptPipeline::new(&mut prompter, &enumerator, &store).run()?;

    let report = if dry_run {
        let dry = DryRunBackend::new(&git);
        Transfer::new(&dry, &patches).dry(true).run(&request)?
    } else {
        Transfer::new(&git, &patches).run(&request)?
    };

    print_summary(&request, &report, dry_run);
    Ok(())
}

fn print_summary(request: &TransferRequest, report: &TransferReport, dry_run: bool) {
    if dry_run {
        println!(
            "Would copy {} from {} onto {} in {}",
            report.range,
            request.source_repo.display(),
            request.dest_branch,
            request.dest_repo.display()
        );
        return;
    }

    println!(
        "Applied {} patch(es) from {} ({}) onto {} in {}",
        report.applied.len(),
        request.source_repo.display(),
        report.range,
        request.dest_branch,
        request.dest_repo.display()
    );
    println!("Checked out {} again", report.restored);
}
