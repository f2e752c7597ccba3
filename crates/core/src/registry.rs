// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job-class registry: named handlers, defaults hooks, settable attributes.
//!
//! Replaces runtime method resolution with registration at class-definition
//! time. Handler lookup misses are silent; the worker simply skips the call.

use crate::error::PerformError;
use crate::job::Job;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Handler invoked with the job instance and its arguments.
pub type Handler = Arc<dyn Fn(&mut Job, &[Value]) -> Result<Value, PerformError> + Send + Sync>;

/// Hook applied to a freshly built job before the caller's configuration
/// closure runs.
pub type DefaultsHook = Arc<dyn Fn(&mut Job) + Send + Sync>;

/// Hook position around a handler method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    Before,
    After,
}

impl HookEvent {
    /// Registry key for `method` at this hook position.
    pub fn method_name(self, method: &str) -> String {
        match self {
            HookEvent::Before => format!("before_{method}"),
            HookEvent::After => format!("after_{method}"),
        }
    }
}

/// Attributes settable on every job class, regardless of registration.
const BASE_SETTABLE: [&str; 6] = [
    "collect_output",
    "description",
    "expires_at",
    "log_level",
    "priority",
    "run_at",
];

/// A registered job class.
pub struct JobClass {
    name: String,
    handlers: HashMap<String, Handler>,
    defaults: Option<DefaultsHook>,
    settable: BTreeSet<String>,
}

impl JobClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: HashMap::new(),
            defaults: None,
            settable: BASE_SETTABLE.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Register a handler under its full method name.
    pub fn handler(
        mut self,
        method: impl Into<String>,
        f: impl Fn(&mut Job, &[Value]) -> Result<Value, PerformError> + Send + Sync + 'static,
    ) -> Self {
        self.handlers.insert(method.into(), Arc::new(f));
        self
    }

    /// Register a `before_{method}` hook.
    pub fn before(
        self,
        method: &str,
        f: impl Fn(&mut Job, &[Value]) -> Result<Value, PerformError> + Send + Sync + 'static,
    ) -> Self {
        self.handler(HookEvent::Before.method_name(method), f)
    }

    /// Register an `after_{method}` hook.
    pub fn after(
        self,
        method: &str,
        f: impl Fn(&mut Job, &[Value]) -> Result<Value, PerformError> + Send + Sync + 'static,
    ) -> Self {
        self.handler(HookEvent::After.method_name(method), f)
    }

    /// Register the class defaults hook applied by the factory's `build`.
    pub fn defaults(mut self, f: impl Fn(&mut Job) + Send + Sync + 'static) -> Self {
        self.defaults = Some(Arc::new(f));
        self
    }

    /// Declare additional attributes a dirmon entry may set via `properties`.
    pub fn settable<I, T>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.settable.extend(attrs.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a handler by full method name. A miss is not an error.
    pub fn resolve(&self, method: &str) -> Option<&Handler> {
        self.handlers.get(method)
    }

    pub fn defaults_hook(&self) -> Option<&DefaultsHook> {
        self.defaults.as_ref()
    }

    pub fn can_set(&self, attr: &str) -> bool {
        self.settable.contains(attr)
    }
}

/// Registry of job classes, shared across workers.
#[derive(Default)]
pub struct JobRegistry {
    classes: RwLock<HashMap<String, Arc<JobClass>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class, replacing any previous registration under the
    /// same name.
    pub fn register(&self, class: JobClass) -> Arc<JobClass> {
        let class = Arc::new(class);
        self.classes
            .write()
            .insert(class.name().to_string(), Arc::clone(&class));
        class
    }

    pub fn get(&self, name: &str) -> Option<Arc<JobClass>> {
        self.classes.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.read().contains_key(name)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
