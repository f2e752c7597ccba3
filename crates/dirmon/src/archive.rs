// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Atomic archival of discovered files.

use crate::error::DirmonError;
use std::path::{Path, PathBuf};
use sw_core::{DirmonEntry, JobId};

/// Resolve the entry's archive directory for a discovered file.
///
/// A relative `archive_directory` resolves against the file's parent; an
/// absolute one is used as-is.
pub fn archive_pathname(entry: &DirmonEntry, pathname: &Path) -> PathBuf {
    let dir = Path::new(&entry.archive_directory);
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        match pathname.parent() {
            Some(parent) => parent.join(dir),
            None => dir.to_path_buf(),
        }
    }
}

/// Move `pathname` into the entry's archive directory as
/// `{job_id}_{basename}`, creating the directory tree on demand.
///
/// Returns the target path.
pub fn archive_file(
    entry: &DirmonEntry,
    job_id: &JobId,
    pathname: &Path,
) -> Result<PathBuf, DirmonError> {
    let dir = archive_pathname(entry, pathname);
    std::fs::create_dir_all(&dir).map_err(|_| DirmonError::NoSuchPath { path: dir.clone() })?;

    let basename = pathname
        .file_name()
        .ok_or_else(|| DirmonError::NoSuchPath {
            path: pathname.to_path_buf(),
        })?
        .to_string_lossy();
    let target = dir.join(format!("{job_id}_{basename}"));

    move_file(pathname, &target)?;
    Ok(target)
}

/// Rename, falling back to copy+unlink when the rename fails (e.g. the
/// archive directory is on another partition).
fn move_file(source: &Path, target: &Path) -> Result<(), DirmonError> {
    if std::fs::rename(source, target).is_ok() {
        return Ok(());
    }
    std::fs::copy(source, target).map_err(|source_err| DirmonError::Io {
        path: target.to_path_buf(),
        source: source_err,
    })?;
    std::fs::remove_file(source).map_err(|source_err| DirmonError::Io {
        path: source.to_path_buf(),
        source: source_err,
    })
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
