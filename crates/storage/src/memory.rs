// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory reference store.
//!
//! A single mutex over both collections makes every operation — including
//! the compound find-and-modify — serializable, which is the correctness
//! hinge for claim handoff under worker contention.

use crate::error::StoreError;
use crate::gateway::{ClaimQuery, ClaimUpdate, DirmonStore, JobPatch, JobStore};
use parking_lot::Mutex;
use std::collections::HashMap;
use sw_core::{DirmonEntry, EntryId, EntryState, Job, JobId, JobState, SubState};

/// Job document plus its insertion sequence (storage-order tie breaker).
#[derive(Debug, Clone)]
struct StoredJob {
    job: Job,
    seq: u64,
}

#[derive(Debug, Default)]
struct Inner {
    jobs: HashMap<String, StoredJob>,
    entries: HashMap<String, DirmonEntry>,
    seq: u64,
}

/// Reference [`JobStore`] + [`DirmonStore`] used by tests and single-process
/// deployments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of job documents currently stored.
    pub fn job_count(&self) -> usize {
        self.inner.lock().jobs.len()
    }
}

fn matches_claim(job: &Job, query: &ClaimQuery<'_>) -> bool {
    let runnable = match job.state {
        JobState::Queued => true,
        JobState::Running => job.sub_state == Some(SubState::Processing),
        _ => false,
    };
    if !runnable {
        return false;
    }
    if job.run_at_ms.is_some_and(|at| at > query.now_ms) {
        return false;
    }
    !query.skip_ids.iter().any(|id| *id == job.id)
}

impl JobStore for MemoryStore {
    fn find_and_modify(
        &self,
        query: &ClaimQuery<'_>,
        update: &ClaimUpdate<'_>,
    ) -> Result<Option<Job>, StoreError> {
        let mut inner = self.inner.lock();
        let best = inner
            .jobs
            .values_mut()
            .filter(|stored| matches_claim(&stored.job, query))
            .min_by_key(|stored| (stored.job.priority, stored.job.created_at_ms, stored.seq));

        let Some(stored) = best else {
            return Ok(None);
        };

        let pre_image = stored.job.clone();
        stored.job.worker_name = Some(update.worker_name.to_string());
        stored.job.state = JobState::Running;
        Ok(Some(pre_image))
    }

    fn insert(&self, job: &Job) -> Result<JobId, StoreError> {
        let mut inner = self.inner.lock();
        if inner.jobs.contains_key(job.id.as_str()) {
            return Err(StoreError::DuplicateId {
                id: job.id.to_string(),
            });
        }
        inner.seq += 1;
        let seq = inner.seq;
        let mut job = job.clone();
        job.persisted = true;
        let id = job.id.clone();
        inner.jobs.insert(id.to_string(), StoredJob { job, seq });
        Ok(id)
    }

    fn update(&self, id: &JobId, patch: &JobPatch) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let stored = inner
            .jobs
            .get_mut(id.as_str())
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        patch.apply(&mut stored.job);
        Ok(())
    }

    fn destroy(&self, id: &JobId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner
            .jobs
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    fn get(&self, id: &JobId) -> Result<Option<Job>, StoreError> {
        let inner = self.inner.lock();
        Ok(inner.jobs.get(id.as_str()).map(|stored| stored.job.clone()))
    }
}

impl DirmonStore for MemoryStore {
    fn insert_entry(&self, entry: &DirmonEntry) -> Result<EntryId, StoreError> {
        let mut inner = self.inner.lock();
        if inner.entries.contains_key(entry.id.as_str()) {
            return Err(StoreError::DuplicateId {
                id: entry.id.to_string(),
            });
        }
        if inner
            .entries
            .values()
            .any(|existing| existing.pattern == entry.pattern)
        {
            return Err(StoreError::DuplicatePattern {
                pattern: entry.pattern.clone(),
            });
        }
        let mut entry = entry.clone();
        entry.persisted = true;
        let id = entry.id.clone();
        inner.entries.insert(entry.id.to_string(), entry);
        Ok(id)
    }

    fn update_entry(&self, entry: &DirmonEntry) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        if !inner.entries.contains_key(entry.id.as_str()) {
            return Err(StoreError::NotFound {
                id: entry.id.to_string(),
            });
        }
        if inner
            .entries
            .values()
            .any(|existing| existing.pattern == entry.pattern && existing.id != entry.id)
        {
            return Err(StoreError::DuplicatePattern {
                pattern: entry.pattern.clone(),
            });
        }
        let mut entry = entry.clone();
        entry.persisted = true;
        inner.entries.insert(entry.id.to_string(), entry);
        Ok(())
    }

    fn destroy_entry(&self, id: &EntryId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner
            .entries
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    fn get_entry(&self, id: &EntryId) -> Result<Option<DirmonEntry>, StoreError> {
        let inner = self.inner.lock();
        Ok(inner.entries.get(id.as_str()).cloned())
    }

    fn entries(&self) -> Result<Vec<DirmonEntry>, StoreError> {
        let inner = self.inner.lock();
        Ok(inner.entries.values().cloned().collect())
    }

    fn counts_by_state(&self) -> Result<HashMap<EntryState, usize>, StoreError> {
        let inner = self.inner.lock();
        let mut counts = HashMap::new();
        for entry in inner.entries.values() {
            *counts.entry(entry.state).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
