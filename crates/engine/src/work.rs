// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker execution contract: hooks, result capture, failure handling.

use crate::error::EngineError;
use crate::runtime::Runtime;
use serde_json::Value;
use std::time::Instant;
use sw_core::{Clock, Error, Exception, HookEvent, Job, LogLevel, Worker};
use sw_storage::JobStore;

impl<S: JobStore, C: Clock> Runtime<S, C> {
    /// Execute a claimed job on behalf of `worker`.
    ///
    /// The sequence is fixed: `before_{m}` hook, `{m}`, result capture,
    /// `after_{m}` hook, `complete!`. A failure in the hooks or the main
    /// handler records `fail!` once and is swallowed — unless inline mode
    /// is on, in which case it is re-raised after recording.
    ///
    /// The returned boolean asks the host to exclude this job from its
    /// next dispatch lookup; always false here, reserved for batch
    /// implementations.
    pub fn work(&self, job: &mut Job, worker: &Worker) -> Result<bool, EngineError> {
        if !job.running() {
            return Err(Error::InvalidState(format!(
                "cannot work {} job {}",
                job.state, job.id
            ))
            .into());
        }

        match self.run_sequence(job) {
            Ok(()) => {
                self.complete(job)?;
                Ok(false)
            }
            Err(err) => {
                if !job.failed() {
                    let exception = Exception::capture(&worker.name, &err);
                    self.fail(job, &worker.name, exception)?;
                }
                tracing::error!(
                    job_id = %job.id,
                    class = %job.job_class_name,
                    worker = %worker.name,
                    error = %err,
                    "job failed"
                );
                if self.config().inline_mode() {
                    Err(err.into())
                } else {
                    Ok(false)
                }
            }
        }
    }

    /// Steps 1–4 of the contract; any error here becomes a `fail!`.
    fn run_sequence(&self, job: &mut Job) -> Result<(), Error> {
        let method = job.perform_method.clone();
        self.call_method(job, &method, Some(HookEvent::Before))?;
        let ret = self.call_method(job, &method, None)?;
        if job.collect_output {
            job.result = Some(capture_result(ret));
        }
        self.call_method(job, &method, Some(HookEvent::After))?;
        Ok(())
    }

    /// Invoke `{event}_{method}` on the job's class.
    ///
    /// A handler the class never registered is silently skipped. Each
    /// invocation is benchmarked under `sidework/{class}/{method}`; a
    /// per-job `log_level` below debug silences the benchmark line.
    pub(crate) fn call_method(
        &self,
        job: &mut Job,
        method: &str,
        event: Option<HookEvent>,
    ) -> Result<Option<Value>, Error> {
        let min_level = job.log_level.as_deref().map(LogLevel::parse).transpose()?;
        let name = match event {
            Some(event) => event.method_name(method),
            None => method.to_string(),
        };
        let class = self.registry().get(&job.job_class_name).ok_or_else(|| {
            Error::BadArgument(format!(
                "job class '{}' is not registered",
                job.job_class_name
            ))
        })?;
        let Some(handler) = class.resolve(&name).cloned() else {
            return Ok(None);
        };

        let arguments = job.arguments.clone();
        let started = Instant::now();
        let out = handler(job, &arguments);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        if min_level.is_none() || min_level.is_some_and(|l| l.allows(LogLevel::Debug)) {
            tracing::debug!(
                metric = %format!("sidework/{}/{}", job.job_class_name, name),
                elapsed_ms,
                "measured"
            );
        }
        out.map(Some).map_err(Error::Perform)
    }
}

/// Wrap a non-mapping perform return as `{result: value}`.
fn capture_result(ret: Option<Value>) -> serde_json::Map<String, Value> {
    match ret.unwrap_or(Value::Null) {
        Value::Object(map) => map,
        other => {
            let mut map = serde_json::Map::new();
            map.insert("result".to_string(), other);
            map
        }
    }
}

#[cfg(test)]
#[path = "work_tests.rs"]
mod tests;
