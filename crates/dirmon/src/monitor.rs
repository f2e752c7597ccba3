// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dirmon entry operations: persistence lifecycle, scanning, enqueue.

use crate::archive;
use crate::error::DirmonError;
use crate::upload::UploadFileJob;
use crate::validate::validate;
use crate::whitelist::Whitelist;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use sw_core::{Clock, DirmonEntry, EntryState, Job, JobId};
use sw_engine::Runtime;
use sw_storage::{DirmonStore, JobStore};

/// Directory-monitor handle over a shared runtime.
///
/// Owns the whitelist; entries themselves are plain documents. The
/// periodic driver calls [`Dirmon::each`] for every enabled entry and
/// [`Dirmon::later`] for every yielded path.
pub struct Dirmon<S, C> {
    runtime: Arc<Runtime<S, C>>,
    whitelist: Whitelist,
}

impl<S, C> Dirmon<S, C>
where
    S: JobStore + DirmonStore,
    C: Clock,
{
    pub fn new(runtime: Arc<Runtime<S, C>>) -> Self {
        Self {
            runtime,
            whitelist: Whitelist::new(),
        }
    }

    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    fn store(&self) -> &S {
        self.runtime.store()
    }

    // ── Persistence lifecycle ───────────────────────────────────────────

    /// Trim, validate against the registry, and persist the entry.
    pub fn save(&self, entry: &mut DirmonEntry) -> Result<(), DirmonError> {
        entry.trim();
        let errors = validate(entry, self.runtime.registry());
        if !errors.is_empty() {
            return Err(DirmonError::Invalid(errors));
        }
        if entry.persisted {
            self.store().update_entry(entry)?;
        } else {
            self.store().insert_entry(entry)?;
            entry.persisted = true;
        }
        Ok(())
    }

    /// pending|disabled → enabled, persisted.
    pub fn enable(&self, entry: &mut DirmonEntry) -> Result<(), DirmonError> {
        entry.enable()?;
        self.store().update_entry(entry)?;
        Ok(())
    }

    /// enabled|failed → disabled, persisted.
    pub fn disable(&self, entry: &mut DirmonEntry) -> Result<(), DirmonError> {
        entry.disable()?;
        self.store().update_entry(entry)?;
        Ok(())
    }

    /// enabled → failed with the exception recorded, persisted. The entry
    /// stops scanning until disabled and re-enabled.
    pub fn fail(
        &self,
        entry: &mut DirmonEntry,
        worker_name: &str,
        message: &str,
    ) -> Result<(), DirmonError> {
        entry.fail(worker_name, message)?;
        self.store().update_entry(entry)?;
        Ok(())
    }

    /// Aggregate `state → count` over all persisted entries.
    pub fn counts_by_state(&self) -> Result<HashMap<EntryState, usize>, DirmonError> {
        Ok(self.store().counts_by_state()?)
    }

    // ── Scanning ────────────────────────────────────────────────────────

    /// Yield each scannable file matching the entry's glob pattern.
    ///
    /// Per-file policy violations (outside the whitelist, not writable)
    /// are logged and skipped; iteration continues. Files that vanish
    /// between match and resolution are skipped with a warning.
    pub fn each(
        &self,
        entry: &DirmonEntry,
        mut f: impl FnMut(&Path),
    ) -> Result<(), DirmonError> {
        let span = tracing::info_span!("scan", dirmon_entry = %entry.name);
        let _guard = span.enter();

        let options = glob::MatchOptions {
            case_sensitive: false,
            ..glob::MatchOptions::new()
        };
        for matched in glob::glob_with(&entry.pattern, options)? {
            let path = match matched {
                Ok(path) => path,
                // Unreadable during matching; let a later scan retry it.
                Err(_) => continue,
            };
            if path.is_dir() {
                continue;
            }
            let canonical = match path.canonicalize() {
                Ok(canonical) => canonical,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::warn!(path = %path.display(), "skipping file that no longer exists");
                    continue;
                }
                Err(source) => return Err(DirmonError::Io { path, source }),
            };
            // Never rescan files already moved into an archive directory.
            if canonical
                .to_string_lossy()
                .contains(DirmonEntry::DEFAULT_ARCHIVE_DIRECTORY)
            {
                continue;
            }
            if !self.whitelist.permits(&canonical) {
                tracing::error!(
                    path = %canonical.display(),
                    "skipping file outside the whitelisted paths"
                );
                continue;
            }
            if !is_writable(&canonical) {
                tracing::error!(
                    path = %canonical.display(),
                    "skipping file that is not writable"
                );
                continue;
            }
            f(&canonical);
        }
        Ok(())
    }

    // ── Enqueue ─────────────────────────────────────────────────────────

    /// Archive a discovered file and enqueue its upload job.
    ///
    /// Archival failures surface to the caller; nothing is enqueued
    /// unless the move succeeded.
    pub fn later(&self, entry: &DirmonEntry, pathname: &Path) -> Result<Job, DirmonError> {
        let job_id = JobId::new();
        let archived = archive::archive_file(entry, &job_id, pathname)?;
        let basename = pathname
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let upload = UploadFileJob {
            job_class_name: entry.job_class_name.clone(),
            properties: entry.properties.clone(),
            description: format!("{}: {}", entry.name, basename),
            upload_file_name: archived.clone(),
            original_file_name: pathname.to_path_buf(),
            job_id: job_id.clone(),
        }
        .create(&self.runtime)?;

        tracing::info!(
            dirmon_entry = %entry.name,
            original_file_name = %pathname.display(),
            upload_file_name = %archived.display(),
            job_id = %job_id,
            upload_job_id = %upload.id,
            "queued upload job for archived file"
        );
        Ok(upload)
    }
}

/// Files must be movable after enqueue, so read-only files are skipped.
fn is_writable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
