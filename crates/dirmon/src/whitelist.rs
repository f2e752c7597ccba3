// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Allow-list of canonical path prefixes for file discovery.

use crate::error::DirmonError;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// Concurrent, ordered set of canonical absolute paths.
///
/// Reads take a snapshot; mutations are atomic add/remove with
/// deduplication. An empty list disables whitelisting entirely.
#[derive(Debug, Default)]
pub struct Whitelist {
    paths: Mutex<Vec<PathBuf>>,
}

impl Whitelist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot copy of the current entries.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.paths.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.lock().is_empty()
    }

    /// Canonicalize and append; returns the canonical path. Fails with
    /// `NoSuchPath` when the path does not exist.
    pub fn add(&self, path: &Path) -> Result<PathBuf, DirmonError> {
        let canonical = canonicalize(path)?;
        let mut paths = self.paths.lock();
        if !paths.contains(&canonical) {
            paths.push(canonical.clone());
        }
        Ok(canonical)
    }

    /// Canonicalize and remove every matching entry.
    pub fn delete(&self, path: &Path) -> Result<(), DirmonError> {
        let canonical = canonicalize(path)?;
        self.paths.lock().retain(|p| *p != canonical);
        Ok(())
    }

    /// Prefix check on an already-canonicalized candidate. An empty
    /// whitelist admits everything.
    pub fn permits(&self, canonical: &Path) -> bool {
        let paths = self.paths.lock();
        paths.is_empty() || paths.iter().any(|prefix| canonical.starts_with(prefix))
    }
}

fn canonicalize(path: &Path) -> Result<PathBuf, DirmonError> {
    path.canonicalize().map_err(|_| DirmonError::NoSuchPath {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
#[path = "whitelist_tests.rs"]
mod tests;
