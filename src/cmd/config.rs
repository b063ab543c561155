// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for patchport.

use crate::config::Config;

/// Display the loaded configuration files, then every option with its value.
pub fn run_options_command(config: &Config, config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
    println!();
    for line in config.format_options() {
        println!("{line}");
    }
}
