// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed gateway traits over the job and dirmon-entry collections.

use crate::error::StoreError;
use std::collections::HashMap;
use sw_core::{DirmonEntry, EntryId, EntryState, Exception, Job, JobId, JobState};

/// Predicate for the dispatcher's atomic claim.
///
/// Matches documents where `(state = queued) OR (state = running AND
/// sub_state = processing)`, `run_at` is absent or `≤ now`, and the id is
/// not in `skip_ids`.
#[derive(Debug, Clone, Copy)]
pub struct ClaimQuery<'a> {
    pub now_ms: u64,
    pub skip_ids: &'a [JobId],
}

/// Compound update applied atomically by a successful claim: the state
/// change is the claim token.
#[derive(Debug, Clone, Copy)]
pub struct ClaimUpdate<'a> {
    pub worker_name: &'a str,
}

/// Partial job patch for `update`; unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPatch {
    pub state: Option<JobState>,
    pub started_at_ms: Option<u64>,
    /// `Some(None)` clears the worker assignment.
    pub worker_name: Option<Option<String>>,
    pub result: Option<serde_json::Map<String, serde_json::Value>>,
    pub exception: Option<Exception>,
}

impl JobPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(mut self, state: JobState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn started_at(mut self, at_ms: u64) -> Self {
        self.started_at_ms = Some(at_ms);
        self
    }

    pub fn clear_worker(mut self) -> Self {
        self.worker_name = Some(None);
        self
    }

    pub fn result(mut self, result: serde_json::Map<String, serde_json::Value>) -> Self {
        self.result = Some(result);
        self
    }

    pub fn exception(mut self, exception: Exception) -> Self {
        self.exception = Some(exception);
        self
    }

    /// Apply this patch to an in-memory document.
    pub fn apply(&self, job: &mut Job) {
        if let Some(state) = self.state {
            job.state = state;
        }
        if let Some(at) = self.started_at_ms {
            job.started_at_ms = Some(at);
        }
        if let Some(worker) = &self.worker_name {
            job.worker_name = worker.clone();
        }
        if let Some(result) = &self.result {
            job.result = Some(result.clone());
        }
        if let Some(exception) = &self.exception {
            job.exception = Some(exception.clone());
        }
    }
}

/// Gateway over the job collection.
pub trait JobStore: Send + Sync {
    /// Atomically match one runnable document, set
    /// `worker_name := update.worker_name, state := running`, and return
    /// the **pre-update** document.
    ///
    /// Candidates are taken in `(priority asc, created_at asc)` order with
    /// ties broken by storage order. Must be serializable with respect to
    /// concurrent callers: at most one caller observes a given document as
    /// claimed.
    fn find_and_modify(
        &self,
        query: &ClaimQuery<'_>,
        update: &ClaimUpdate<'_>,
    ) -> Result<Option<Job>, StoreError>;

    fn insert(&self, job: &Job) -> Result<JobId, StoreError>;

    /// Partial persistence without state-machine involvement.
    fn update(&self, id: &JobId, patch: &JobPatch) -> Result<(), StoreError>;

    fn destroy(&self, id: &JobId) -> Result<(), StoreError>;

    fn get(&self, id: &JobId) -> Result<Option<Job>, StoreError>;
}

/// Gateway over the `sidework.dirmon_entries` collection.
///
/// Writes enforce the unique index on `pattern`.
pub trait DirmonStore: Send + Sync {
    fn insert_entry(&self, entry: &DirmonEntry) -> Result<EntryId, StoreError>;

    /// Persist the post-image of a transitioned or edited entry.
    fn update_entry(&self, entry: &DirmonEntry) -> Result<(), StoreError>;

    fn destroy_entry(&self, id: &EntryId) -> Result<(), StoreError>;

    fn get_entry(&self, id: &EntryId) -> Result<Option<DirmonEntry>, StoreError>;

    fn entries(&self) -> Result<Vec<DirmonEntry>, StoreError>;

    /// Aggregate `state → count`; states with no entries are absent.
    fn counts_by_state(&self) -> Result<HashMap<EntryState, usize>, StoreError>;
}
