// patchport: copy commit ranges between local git repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scratch directory receiving exported patches.
//!
//! Reset once per run, filled by `git format-patch`, then read back in
//! filename order. Never cleaned up after. A reset only clears a directory
//! that holds nothing but regular `*.patch` files.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{FsError, PortResult};

#[derive(Debug, Clone)]
pub struct PatchDir {
    path: PathBuf,
}

impl PatchDir {
    /// Wrap `path`, made absolute against the current directory.
    ///
    /// git runs with the source repository as its working directory, so a
    /// relative output path would land inside it.
    ///
    /// # Errors
    ///
    /// Returns an `FsError` if the current directory cannot be determined.
    pub fn new(path: impl AsRef<Path>) -> PortResult<Self> {
        let path = path.as_ref();
        let path = std::path::absolute(path).map_err(|e| FsError::io(path, e))?;
        Ok(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory if present, then recreate it empty.
    ///
    /// # Errors
    ///
    /// Returns `FsError::NotADirectory` if the path is a file or symlink,
    /// `FsError::NotPatchDir` if the directory holds anything besides
    /// regular `*.patch` files, and an `FsError` if removal or creation fails.
    pub fn reset(&self) -> PortResult<()> {
        match std::fs::symlink_metadata(&self.path) {
            Ok(meta) if meta.is_dir() => {
                self.ensure_only_patches()?;
                std::fs::remove_dir_all(&self.path).map_err(|e| FsError::io(&self.path, e))?;
                debug!(path = %self.path.display(), "removed previous patch directory");
            }
            Ok(_) => return Err(FsError::NotADirectory(self.path.display().to_string()).into()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(FsError::io(&self.path, e).into()),
        }
        std::fs::create_dir_all(&self.path).map_err(|e| FsError::io(&self.path, e))?;
        Ok(())
    }

    fn ensure_only_patches(&self) -> PortResult<()> {
        for entry in std::fs::read_dir(&self.path).map_err(|e| FsError::io(&self.path, e))? {
            let entry = entry.map_err(|e| FsError::io(&self.path, e))?;
            let file_type = entry.file_type().map_err(|e| FsError::io(&entry.path(), e))?;
            let path = entry.path();
            if !(file_type.is_file() && path.extension().is_some_and(|ext| ext == "patch")) {
                return Err(FsError::NotPatchDir {
                    dir: self.path.display().to_string(),
                    entry: entry.file_name().to_string_lossy().into_owned(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Patch files in ascending filename order.
    ///
    /// `git format-patch` prefixes files with a zero-padded sequence number,
    /// so this is also the order the commits were made in.
    ///
    /// # Errors
    ///
    /// Returns an `FsError` if the directory cannot be read.
    pub fn patches(&self) -> PortResult<Vec<PathBuf>> {
        let mut patches = Vec::new();
        for entry in std::fs::read_dir(&self.path).map_err(|e| FsError::io(&self.path, e))? {
            let entry = entry.map_err(|e| FsError::io(&self.path, e))?;
            if entry.path().is_file() {
                patches.push(entry.path());
            }
        }
        patches.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(patches)
    }

    /// Whether the directory holds no entries (or does not exist).
    ///
    /// # Errors
    ///
    /// Returns an `FsError` if an existing directory cannot be read.
    pub fn is_empty(&self) -> PortResult<bool> {
        match std::fs::read_dir(&self.path) {
            Ok(mut entries) => Ok(entries.next().is_none()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(FsError::io(&self.path, e).into()),
        }
    }
}
