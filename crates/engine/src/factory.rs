// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Factory surface: build, enqueue-later, and run-inline.

use crate::error::EngineError;
use crate::runtime::Runtime;
use serde_json::Value;
use sw_core::{Clock, Error, Job, Worker};
use sw_storage::JobStore;

impl<S: JobStore, C: Clock> Runtime<S, C> {
    /// Construct a job in memory: class defaults hook first, then the
    /// caller's configuration closure. Nothing is persisted.
    pub fn build(
        &self,
        job_class_name: &str,
        method: &str,
        arguments: Vec<Value>,
        configure: impl FnOnce(&mut Job),
    ) -> Result<Job, EngineError> {
        let class = self.registry().get(job_class_name).ok_or_else(|| {
            Error::BadArgument(format!("job class '{job_class_name}' is not registered"))
        })?;
        let mut job = Job::new(
            job_class_name,
            method,
            arguments,
            self.clock().epoch_ms(),
        );
        if let Some(hook) = class.defaults_hook() {
            hook(&mut job);
        }
        configure(&mut job);
        Ok(job)
    }

    /// Queue a job for asynchronous execution. Inline mode bypasses
    /// persistence and delegates to [`Runtime::now`].
    pub fn later(
        &self,
        job_class_name: &str,
        method: &str,
        arguments: Vec<Value>,
        configure: impl FnOnce(&mut Job),
    ) -> Result<Job, EngineError> {
        if self.config().inline_mode() {
            return self.now(job_class_name, method, arguments, configure);
        }
        let mut job = self.build(job_class_name, method, arguments, configure)?;
        self.store().insert(&job)?;
        job.persisted = true;
        Ok(job)
    }

    /// Build and run synchronously on a fabricated pre-started "inline"
    /// worker, looping `work` until the job leaves `running` or asks to
    /// be excluded. Returns the terminal job.
    pub fn now(
        &self,
        job_class_name: &str,
        method: &str,
        arguments: Vec<Value>,
        configure: impl FnOnce(&mut Job),
    ) -> Result<Job, EngineError> {
        let mut job = self.build(job_class_name, method, arguments, configure)?;
        let worker = Worker::inline();
        job.start(&worker.name, self.clock().epoch_ms())?;
        while job.running() {
            if self.work(&mut job, &worker)? {
                break;
            }
        }
        Ok(job)
    }

    /// `later` with the default `perform` method.
    pub fn perform_later(
        &self,
        job_class_name: &str,
        arguments: Vec<Value>,
    ) -> Result<Job, EngineError> {
        self.later(job_class_name, Job::PERFORM, arguments, |_| {})
    }

    /// `now` with the default `perform` method.
    pub fn perform_now(
        &self,
        job_class_name: &str,
        arguments: Vec<Value>,
    ) -> Result<Job, EngineError> {
        self.now(job_class_name, Job::PERFORM, arguments, |_| {})
    }

    /// `build` with the default `perform` method.
    pub fn perform_build(
        &self,
        job_class_name: &str,
        arguments: Vec<Value>,
    ) -> Result<Job, EngineError> {
        self.build(job_class_name, Job::PERFORM, arguments, |_| {})
    }
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;
