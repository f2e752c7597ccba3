// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Atomic claim of the next runnable job.

use crate::error::EngineError;
use crate::runtime::Runtime;
use sw_core::{Clock, Job, JobId};
use sw_storage::{ClaimQuery, ClaimUpdate, JobPatch, JobStore};

impl<S: JobStore, C: Clock> Runtime<S, C> {
    /// Claim the highest-priority runnable job for `worker_name`.
    ///
    /// The compound update inside `find_and_modify` is the claim token: no
    /// two workers can claim the same queued job. Jobs listed in
    /// `skip_ids` are excluded from the lookup.
    ///
    /// Loops internally to reap expired claims: an expired queued job is
    /// destroyed and the lookup retried. A pre-image that was already
    /// running matched via `sub_state = processing`; it is an in-flight
    /// batch job acquiring an additional worker and is returned without
    /// re-firing `start`, with `started_at` left from the original start.
    pub fn next_job(
        &self,
        worker_name: &str,
        skip_ids: &[JobId],
    ) -> Result<Option<Job>, EngineError> {
        loop {
            let now_ms = self.clock().epoch_ms();
            let query = ClaimQuery {
                now_ms,
                skip_ids,
            };
            let update = ClaimUpdate { worker_name };

            let Some(mut job) = self.store().find_and_modify(&query, &update)? else {
                return Ok(None);
            };

            if job.running() {
                // Mirror the claim the store already applied.
                job.worker_name = Some(worker_name.to_string());
                tracing::debug!(job_id = %job.id, worker = worker_name, "joined processing job");
                return Ok(Some(job));
            }

            if job.expired(now_ms) {
                self.store().destroy(&job.id)?;
                tracing::debug!(job_id = %job.id, "destroyed expired job");
                continue;
            }

            job.start(worker_name, now_ms)?;
            self.set(&job, &JobPatch::new().started_at(now_ms))?;
            tracing::debug!(job_id = %job.id, worker = worker_name, "claimed job");
            return Ok(Some(job));
        }
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
