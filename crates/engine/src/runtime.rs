// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared runtime wiring: store, registry, config, clock.

use crate::config::Config;
use crate::error::EngineError;
use std::sync::Arc;
use sw_core::{Clock, Exception, Job, JobRegistry, JobState, SystemClock};
use sw_storage::{JobPatch, JobStore};

/// Engine handle shared by worker hosts and producers.
///
/// A single `Runtime` serves many workers concurrently; each claimed job
/// instance is exclusively owned by the worker that claimed it.
pub struct Runtime<S, C = SystemClock> {
    store: Arc<S>,
    registry: Arc<JobRegistry>,
    config: Arc<Config>,
    clock: C,
}

impl<S, C: Clock> Runtime<S, C> {
    pub fn new(store: Arc<S>, registry: Arc<JobRegistry>, config: Arc<Config>, clock: C) -> Self {
        Self {
            store,
            registry,
            config,
            clock,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<S: JobStore, C: Clock> Runtime<S, C> {
    /// Persist a partial patch for a job without a state transition.
    ///
    /// Jobs that were never written through the gateway (inline mode) are
    /// mutated in memory only.
    pub fn set(&self, job: &Job, patch: &JobPatch) -> Result<(), EngineError> {
        if job.persisted {
            self.store.update(&job.id, patch)?;
        }
        Ok(())
    }

    /// running → completed, persisting the post-image and any collected
    /// result.
    pub fn complete(&self, job: &mut Job) -> Result<(), EngineError> {
        job.complete()?;
        let mut patch = JobPatch::new().state(JobState::Completed).clear_worker();
        if let Some(result) = &job.result {
            patch = patch.result(result.clone());
        }
        self.set(job, &patch)
    }

    /// running → failed, persisting the exception record. No-op when the
    /// job already failed.
    pub fn fail(
        &self,
        job: &mut Job,
        worker_name: &str,
        exception: Exception,
    ) -> Result<(), EngineError> {
        job.fail(worker_name, exception)?;
        let mut patch = JobPatch::new().state(JobState::Failed).clear_worker();
        if let Some(exception) = &job.exception {
            patch = patch.exception(exception.clone());
        }
        self.set(job, &patch)
    }
}
