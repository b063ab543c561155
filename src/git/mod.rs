// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!        Public API
//!   query.rs      enumerate.rs
//!        \          /
//!         v        v
//!      ,------------------,
//!      | backend (traits) |
//!      '--+----------+----'
//!         |          |
//!         v          v
//!    GitQuery    GitListing + GitMutation
//!   (gix, read)  (CLI text, writes)
//!         |          |
//!         v          v
//!    GixBackend  ShellBackend / DryRunBackend
//!    .branch     .branch_list  .format_patch
//!    .uncommit   .commit_log   .checkout
//!                              .apply_patch
//! ```

pub mod backend;
pub mod enumerate;
pub mod query;
