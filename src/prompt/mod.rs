// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interactive prompts.
//!
//! ```text
//! PromptPipeline ──> Prompter (trait)
//!      |               └── TerminalPrompter (dialoguer)
//!      └──────────> Enumerator (trait)
//!                      └── GitEnumerator
//! ```
//!
//! A prompter returns `Ok(None)` when the user backs out; the pipeline
//! turns that into [`PromptError::Cancelled`](crate::error::PromptError).

pub mod pipeline;


use dialoguer::{Input, Select};

use crate::error::{PortResult, PromptError};

/// Source of operator answers.
pub trait Prompter {
    /// Ask for free text, offering `default` when the answer is left empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn input(&mut self, message: &str, default: Option<&str>) -> PortResult<Option<String>>;

    /// Ask the user to pick one of `items`; returns the chosen index.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn select(&mut self, message: &str, items: &[String]) -> PortResult<Option<usize>>;
}

/// [`Prompter`] reading from the controlling terminal.
///
/// `Esc` or `q` on a selection and `Ctrl-C` anywhere count as cancelling.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    /// `Ok` when the terminal read was interrupted (`Ctrl-C`), i.e. a cancel.
    fn check_interrupted(err: dialoguer::Error) -> PortResult<()> {
        match err {
            dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => Ok(()),
            other => Err(PromptError::Terminal(other).into()),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, message: &str, default: Option<&str>) -> PortResult<Option<String>> {
        let mut input = Input::<String>::new().with_prompt(message);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        match input.interact_text() {
            Ok(text) => Ok(Some(text)),
            Err(e) => Self::check_interrupted(e).map(|()| None),
        }
    }

    fn select(&mut self, message: &str, items: &[String]) -> PortResult<Option<usize>> {
        match Select::new()
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact_opt()
        {
            Ok(index) => Ok(index),
            Err(e) => Self::check_interrupted(e).map(|()| None),
        }
    }
}
