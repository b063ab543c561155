// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::layered(exe_dir, --config files)
//!   exe_dir/patchport.toml   (Layer::Installed, optional)
//!   ./patchport.toml         (Layer::WorkDir,   optional)
//!   --config FILE...         (Layer::Explicit,  required)
//!   PATCHPORT_* env
//!   .with_overrides(CLI)
//!        |
//!        v
//!    build() --> Config (paths resolved)
//! ```

use config::{File, FileFormat};
use std::fmt;
use std::path::{Path, PathBuf};

use super::Config;
use crate::error::Result;

/// Name of the config file looked up beside the executable and in the cwd.
pub const CONFIG_FILE_NAME: &str = "patchport.toml";

/// Prefix of environment overrides, e.g. `PATCHPORT_GIT__PROGRAM`.
pub const ENV_PREFIX: &str = "PATCHPORT";

/// Where a loaded config file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// `patchport.toml` beside the executable.
    Installed,
    /// `patchport.toml` in the current directory.
    WorkDir,
    /// A file given with `--config`.
    Explicit,
    /// Inline TOML.
    Inline,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Installed => "installed",
            Self::WorkDir => "cwd",
            Self::Explicit => "--config",
            Self::Inline => "inline",
        })
    }
}

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    files: Vec<(Layer, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            files: Vec::new(),
        }
    }

    /// The full lookup chain: installed file, cwd file, every `explicit`
    /// file in order, then `PATCHPORT_*` environment variables.
    #[must_use]
    pub fn layered(exe_dir: Option<&Path>, explicit: &[PathBuf]) -> Self {
        let mut loader = Self::new();
        if let Some(dir) = exe_dir {
            loader = loader.add_layer(Layer::Installed, dir.join(CONFIG_FILE_NAME), false);
        }
        let local = Path::new(CONFIG_FILE_NAME);
        // cwd == exe dir would otherwise load the same file twice
        if exe_dir.is_none_or(|dir| std::path::absolute(local).ok() != Some(dir.join(local))) {
            loader = loader.add_layer(Layer::WorkDir, local.to_path_buf(), false);
        }
        for path in explicit {
            loader = loader.add_toml_file(path);
        }
        loader.with_env_prefix(ENV_PREFIX)
    }

    fn add_layer(mut self, layer: Layer, path: PathBuf, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required));
        if required || path.exists() {
            self.files.push((layer, path));
        }
        self
    }

    /// Adds a TOML configuration file that must exist.
    ///
    /// The file is read when `build()` is called; a missing file or invalid
    /// TOML makes `build()` fail.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_layer(Layer::Explicit, path.as_ref().to_path_buf(), true)
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files.push((Layer::Inline, PathBuf::from("<inline>")));
        self
    }

    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets a configuration override, e.g. `("paths.patches", "/tmp/p")`.
    ///
    /// Overrides win over every file and environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("invalid override '{key}': {e}"))?;
        Ok(self)
    }

    /// Applies every `(key, value)` pair with [`ConfigLoader::set`].
    ///
    /// # Errors
    ///
    /// Returns an error on the first invalid key.
    pub fn with_overrides<I, K, V>(self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<config::Value>,
    {
        overrides
            .into_iter()
            .try_fold(self, |loader, (key, value)| loader.set(key.as_ref(), value))
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A required configuration file is missing.
    /// - A configuration file has invalid TOML syntax.
    /// - An environment variable cannot be parsed.
    /// - The merged result does not match `Config` or a relative path cannot be resolved.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let mut config: Config = builder.build()?.try_deserialize()?;
        config.resolve_and_validate()?;
        Ok(config)
    }

    /// Files that will be read, in precedence order (last wins).
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (layer, path))| format!("{}. [{layer}] {}", i + 1, path.display()))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
