// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for engine tests.

use crate::config::Config;
use crate::runtime::Runtime;
use serde_json::{json, Value};
use std::sync::Arc;
use sw_core::{FakeClock, JobClass, JobRegistry, PerformError};
use sw_storage::MemoryStore;

pub(crate) struct Fixture {
    pub store: Arc<MemoryStore>,
    pub registry: Arc<JobRegistry>,
    pub config: Arc<Config>,
    pub clock: FakeClock,
    pub runtime: Runtime<MemoryStore, FakeClock>,
}

pub(crate) fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let registry = Arc::new(JobRegistry::new());
    let config = Arc::new(Config::new());
    let clock = FakeClock::new();
    let runtime = Runtime::new(
        Arc::clone(&store),
        Arc::clone(&registry),
        Arc::clone(&config),
        clock.clone(),
    );
    Fixture {
        store,
        registry,
        config,
        clock,
        runtime,
    }
}

/// Class whose perform echoes its first argument.
pub(crate) fn echo_class() -> JobClass {
    JobClass::new("echo").handler("perform", |_job, args| {
        Ok(args.first().cloned().unwrap_or(Value::Null))
    })
}

/// Class whose perform always fails with `RuntimeError: boom`.
pub(crate) fn boom_class() -> JobClass {
    JobClass::new("boom").handler("perform", |_job, _args| {
        Err(PerformError::new("RuntimeError", "boom"))
    })
}

/// Class returning a mapping from perform.
pub(crate) fn mapping_class() -> JobClass {
    JobClass::new("mapping").handler("perform", |_job, _args| Ok(json!({"rows": 3})))
}
