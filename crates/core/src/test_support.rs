// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::job::{Job, JobState};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::dirmon::EntryState;
    use crate::job::JobState;
    use proptest::prelude::*;

    pub fn arb_job_state() -> impl Strategy<Value = JobState> {
        prop_oneof![
            Just(JobState::Queued),
            Just(JobState::Running),
            Just(JobState::Completed),
            Just(JobState::Failed),
        ]
    }

    pub fn arb_entry_state() -> impl Strategy<Value = EntryState> {
        prop_oneof![
            Just(EntryState::Pending),
            Just(EntryState::Enabled),
            Just(EntryState::Disabled),
            Just(EntryState::Failed),
        ]
    }
}

// ── Factory functions ───────────────────────────────────────────────────

/// A queued job ready for dispatch at the given priority and creation time.
pub fn queued_job(class: &str, priority: i32, created_at_ms: u64) -> Job {
    Job::builder()
        .job_class_name(class)
        .state(JobState::Queued)
        .priority(priority)
        .created_at_ms(created_at_ms)
        .build()
}
