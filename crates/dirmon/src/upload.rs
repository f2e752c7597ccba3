// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Constructor contract for the follow-on upload job.

use crate::error::DirmonError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use sw_core::{Clock, Job, JobId};
use sw_engine::Runtime;
use sw_storage::JobStore;

/// Class name under which upload jobs are queued. The perform handler is
/// supplied by the host; only the constructor lives here.
pub const UPLOAD_JOB_CLASS: &str = "upload_file";

/// Payload of a queued upload job, carried verbatim as the job's single
/// argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadFileJob {
    /// Class the upload will eventually instantiate for the file.
    pub job_class_name: String,
    pub properties: serde_json::Map<String, Value>,
    pub description: String,
    /// Archived location the upload reads from.
    pub upload_file_name: PathBuf,
    /// Location the file was discovered at.
    pub original_file_name: PathBuf,
    /// Pre-minted id for the job the upload will create.
    pub job_id: JobId,
}

impl UploadFileJob {
    /// Persist this payload as a queued job.
    ///
    /// Deliberately bypasses the factory's defaults hook: the upload job
    /// class is a contract with the host, not a registered class, and must
    /// be enqueueable before the host registers its handler.
    pub fn create<S: JobStore, C: Clock>(
        self,
        runtime: &Runtime<S, C>,
    ) -> Result<Job, DirmonError> {
        let description = self.description.clone();
        let payload = serde_json::to_value(&self)?;
        let mut job = Job::new(
            UPLOAD_JOB_CLASS,
            Job::PERFORM,
            vec![payload],
            runtime.clock().epoch_ms(),
        );
        job.description = Some(description);
        runtime.store().insert(&job)?;
        job.persisted = true;
        Ok(job)
    }
}
