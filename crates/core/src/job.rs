// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job document and state machine.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;

crate::define_id! {
    /// Unique identifier for a persisted job document.
    pub struct JobId("job-");
}

/// Lifecycle state of a job document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Waiting to be claimed by a worker
    Queued,
    /// Claimed; owned by `worker_name` until terminal
    Running,
    /// Finished normally (terminal)
    Completed,
    /// Finished with a captured exception (terminal)
    Failed,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }
}

crate::simple_display! {
    JobState {
        Queued => "queued",
        Running => "running",
        Completed => "completed",
        Failed => "failed",
    }
}

/// Marker on a running job indicating additional workers may claim it
/// (batch dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubState {
    Processing,
}

crate::simple_display! {
    SubState {
        Processing => "processing",
    }
}

/// Minimum severity a per-job `log_level` override admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a persisted level string; unknown values are a [`Error::BadArgument`].
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(Error::BadArgument(format!("unknown log level '{other}'"))),
        }
    }

    /// True when a message at `level` clears this minimum.
    pub fn allows(self, level: LogLevel) -> bool {
        level >= self
    }
}

crate::simple_display! {
    LogLevel {
        Trace => "trace",
        Debug => "debug",
        Info => "info",
        Warn => "warn",
        Error => "error",
    }
}

/// Embedded record describing the failure that moved a document to `failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exception {
    pub class_name: String,
    pub message: String,
    pub backtrace: Vec<String>,
    /// Worker that owned the claim when the failure was recorded.
    pub worker_name: String,
}

impl Exception {
    pub fn new(
        worker_name: impl Into<String>,
        class_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            message: message.into(),
            backtrace: current_backtrace(),
            worker_name: worker_name.into(),
        }
    }

    /// Build an exception record from a worker-side error.
    pub fn capture(worker_name: &str, error: &Error) -> Self {
        Self::new(worker_name, error.class_name(), error.message())
    }
}

fn current_backtrace() -> Vec<String> {
    std::backtrace::Backtrace::force_capture()
        .to_string()
        .lines()
        .map(str::to_string)
        .collect()
}

/// A persisted job document.
///
/// Created by the factory, persisted on `later`, claimed atomically by the
/// dispatcher, and mutated only by its claiming worker until terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    /// Registered job class owning the handlers for this job.
    pub job_class_name: String,
    /// Handler name the worker invokes; hooks resolve as `before_{m}` / `after_{m}`.
    pub perform_method: String,
    /// Ordered handler arguments, preserved verbatim across persistence.
    #[serde(default)]
    pub arguments: Vec<Value>,
    pub state: JobState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_state: Option<SubState>,
    /// Lower numeric value = higher priority.
    pub priority: i32,
    pub created_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at_ms: Option<u64>,
    /// Not dispatchable before this time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_at_ms: Option<u64>,
    /// Destroyed instead of started when past at claim time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at_ms: Option<u64>,
    /// Worker currently holding the claim; unset while queued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_name: Option<String>,
    /// When true, the perform return value is captured into `result`.
    #[serde(default)]
    pub collect_output: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<Exception>,
    /// Per-job override for hook logging verbosity (parsed by [`LogLevel`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// True once the document has been written through the store gateway.
    /// Runtime-only; deserialized documents always came from the store.
    #[serde(skip_serializing, default = "persisted_default")]
    pub persisted: bool,
}

fn persisted_default() -> bool {
    true
}

impl Job {
    pub const DEFAULT_PRIORITY: i32 = 50;

    /// Default handler name.
    pub const PERFORM: &'static str = "perform";

    pub fn new(
        job_class_name: impl Into<String>,
        perform_method: impl Into<String>,
        arguments: Vec<Value>,
        now_ms: u64,
    ) -> Self {
        Self {
            id: JobId::new(),
            job_class_name: job_class_name.into(),
            perform_method: perform_method.into(),
            arguments,
            state: JobState::Queued,
            sub_state: None,
            priority: Self::DEFAULT_PRIORITY,
            created_at_ms: now_ms,
            started_at_ms: None,
            run_at_ms: None,
            expires_at_ms: None,
            worker_name: None,
            collect_output: false,
            result: None,
            exception: None,
            log_level: None,
            description: None,
            persisted: false,
        }
    }

    pub fn queued(&self) -> bool {
        self.state == JobState::Queued
    }

    pub fn running(&self) -> bool {
        self.state == JobState::Running
    }

    pub fn completed(&self) -> bool {
        self.state == JobState::Completed
    }

    pub fn failed(&self) -> bool {
        self.state == JobState::Failed
    }

    /// True when `expires_at` is set and past.
    pub fn expired(&self, now_ms: u64) -> bool {
        self.expires_at_ms.is_some_and(|t| t <= now_ms)
    }

    /// queued → running. Records the claiming worker and the start time.
    pub fn start(&mut self, worker_name: &str, now_ms: u64) -> Result<(), Error> {
        if self.state != JobState::Queued {
            return Err(self.invalid_transition("start"));
        }
        self.state = JobState::Running;
        self.worker_name = Some(worker_name.to_string());
        self.started_at_ms = Some(now_ms);
        Ok(())
    }

    /// running → completed. Rejected once the job is terminal.
    pub fn complete(&mut self) -> Result<(), Error> {
        if self.state != JobState::Running {
            return Err(self.invalid_transition("complete"));
        }
        self.state = JobState::Completed;
        self.worker_name = None;
        Ok(())
    }

    /// running → failed with a captured exception record. No-op when
    /// already failed.
    pub fn fail(&mut self, worker_name: &str, mut exception: Exception) -> Result<(), Error> {
        match self.state {
            JobState::Failed => Ok(()),
            JobState::Running => {
                exception.worker_name = worker_name.to_string();
                self.exception = Some(exception);
                self.state = JobState::Failed;
                self.worker_name = None;
                Ok(())
            }
            _ => Err(self.invalid_transition("fail")),
        }
    }

    fn invalid_transition(&self, event: &str) -> Error {
        Error::InvalidTransition {
            state: self.state.to_string(),
            event: event.to_string(),
        }
    }
}

crate::builder! {
    pub struct JobBuilder => Job {
        into {
            id: JobId = JobId::new(),
            job_class_name: String = "test_job",
            perform_method: String = Job::PERFORM,
        }
        set {
            arguments: Vec<Value> = Vec::new(),
            state: JobState = JobState::Queued,
            priority: i32 = Job::DEFAULT_PRIORITY,
            created_at_ms: u64 = 1_000_000,
            collect_output: bool = false,
            persisted: bool = false,
        }
        option {
            sub_state: SubState = None,
            started_at_ms: u64 = None,
            run_at_ms: u64 = None,
            expires_at_ms: u64 = None,
            worker_name: String = None,
            result: serde_json::Map<String, Value> = None,
            exception: Exception = None,
            log_level: String = None,
            description: String = None,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
