// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dirmon entry document and state machine.

use crate::error::Error;
use crate::job::Exception;
use serde::{Deserialize, Serialize};
use serde_json::Value;

crate::define_id! {
    /// Unique identifier for a persisted directory-monitor rule.
    pub struct EntryId("dme-");
}

/// Lifecycle state of a dirmon entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    /// Created, awaiting approval
    Pending,
    /// Scanned by the dirmon driver
    Enabled,
    /// Manually switched off
    Disabled,
    /// Stopped after a policy or IO violation; `exception` is set
    Failed,
}

crate::simple_display! {
    EntryState {
        Pending => "pending",
        Enabled => "enabled",
        Disabled => "disabled",
        Failed => "failed",
    }
}

/// A persistent directory-monitoring rule.
///
/// Discovers files matching `pattern`, archives them, and enqueues an
/// upload job built from `job_class_name` and `properties`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirmonEntry {
    pub id: EntryId,
    pub name: String,
    /// Glob matched case-insensitively against the filesystem.
    pub pattern: String,
    /// Registered job class the enqueued upload job will eventually run.
    pub job_class_name: String,
    /// Attributes applied to the eventual job; keys are validated against
    /// the class's settable attributes at save time.
    #[serde(default)]
    pub properties: serde_json::Map<String, Value>,
    /// Relative directories resolve against each discovered file's parent.
    pub archive_directory: String,
    pub state: EntryState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<Exception>,
    /// True once the document has been written through the store gateway.
    /// Runtime-only; deserialized documents always came from the store.
    #[serde(skip_serializing, default = "persisted_default")]
    pub persisted: bool,
}

fn persisted_default() -> bool {
    true
}

impl DirmonEntry {
    /// Token marking archive directories; scans skip any path containing it.
    pub const DEFAULT_ARCHIVE_DIRECTORY: &'static str = "archive";

    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        job_class_name: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            name: name.into(),
            pattern: pattern.into(),
            job_class_name: job_class_name.into(),
            properties: serde_json::Map::new(),
            archive_directory: Self::DEFAULT_ARCHIVE_DIRECTORY.to_string(),
            state: EntryState::Pending,
            exception: None,
            persisted: false,
        }
    }

    pub fn enabled(&self) -> bool {
        self.state == EntryState::Enabled
    }

    pub fn failed(&self) -> bool {
        self.state == EntryState::Failed
    }

    /// pending|disabled → enabled.
    pub fn enable(&mut self) -> Result<(), Error> {
        match self.state {
            EntryState::Pending | EntryState::Disabled => {
                self.state = EntryState::Enabled;
                Ok(())
            }
            _ => Err(self.invalid_transition("enable")),
        }
    }

    /// enabled|failed → disabled.
    pub fn disable(&mut self) -> Result<(), Error> {
        match self.state {
            EntryState::Enabled | EntryState::Failed => {
                self.state = EntryState::Disabled;
                Ok(())
            }
            _ => Err(self.invalid_transition("disable")),
        }
    }

    /// enabled → failed. Fires the `set_exception` before-hook so the
    /// persisted post-image always carries the failure record.
    pub fn fail(&mut self, worker_name: &str, message: &str) -> Result<(), Error> {
        if self.state != EntryState::Enabled {
            return Err(self.invalid_transition("fail"));
        }
        self.set_exception(worker_name, message);
        self.state = EntryState::Failed;
        Ok(())
    }

    /// Before-hook for `fail`: record the failure ahead of the transition.
    pub fn set_exception(&mut self, worker_name: &str, message: &str) {
        self.exception = Some(Exception::new(worker_name, "DirmonEntryError", message));
    }

    /// Strip leading/trailing whitespace from the validated fields.
    pub fn trim(&mut self) {
        self.name = self.name.trim().to_string();
        self.pattern = self.pattern.trim().to_string();
        self.job_class_name = self.job_class_name.trim().to_string();
        self.archive_directory = self.archive_directory.trim().to_string();
    }

    fn invalid_transition(&self, event: &str) -> Error {
        Error::InvalidTransition {
            state: self.state.to_string(),
            event: event.to_string(),
        }
    }
}

crate::builder! {
    pub struct DirmonEntryBuilder => DirmonEntry {
        into {
            id: EntryId = EntryId::new(),
            name: String = "test-entry",
            pattern: String = "/tmp/input/*.csv",
            job_class_name: String = "test_job",
            archive_directory: String = DirmonEntry::DEFAULT_ARCHIVE_DIRECTORY,
        }
        set {
            properties: serde_json::Map<String, Value> = serde_json::Map::new(),
            state: EntryState = EntryState::Pending,
            persisted: bool = false,
        }
        option {
            exception: Exception = None,
        }
    }
}

#[cfg(test)]
#[path = "dirmon_tests.rs"]
mod tests;
