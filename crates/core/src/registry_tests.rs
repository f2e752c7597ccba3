// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::job::Job;
use serde_json::{json, Value};

fn echo_class() -> JobClass {
    JobClass::new("echo")
        .handler(Job::PERFORM, |_job, args| {
            Ok(args.first().cloned().unwrap_or(Value::Null))
        })
        .before(Job::PERFORM, |job, _args| {
            job.description = Some("starting".to_string());
            Ok(Value::Null)
        })
}

#[test]
fn resolve_finds_registered_handlers() {
    let class = echo_class();
    assert!(class.resolve("perform").is_some());
    assert!(class.resolve("before_perform").is_some());
    assert!(class.resolve("after_perform").is_none());
    assert!(class.resolve("upload").is_none());
}

#[test]
fn hook_event_resolves_method_names() {
    assert_eq!(HookEvent::Before.method_name("perform"), "before_perform");
    assert_eq!(HookEvent::After.method_name("upload"), "after_upload");
}

#[test]
fn handlers_receive_job_and_arguments() {
    let class = echo_class();
    let mut job = Job::builder().build();
    let handler = class.resolve("perform").unwrap();

    let out = handler(&mut job, &[json!("hello")]).unwrap();
    assert_eq!(out, json!("hello"));
}

#[test]
fn hooks_can_mutate_the_job() {
    let class = echo_class();
    let mut job = Job::builder().build();
    let hook = class.resolve("before_perform").unwrap();

    hook(&mut job, &[]).unwrap();
    assert_eq!(job.description.as_deref(), Some("starting"));
}

#[test]
fn defaults_hook_is_stored() {
    let class = JobClass::new("nightly").defaults(|job| job.priority = 10);
    let mut job = Job::builder().build();

    if let Some(hook) = class.defaults_hook() {
        hook(&mut job);
    }
    assert_eq!(job.priority, 10);
}

#[test]
fn base_attributes_are_settable() {
    let class = JobClass::new("echo");
    assert!(class.can_set("priority"));
    assert!(class.can_set("description"));
    assert!(class.can_set("log_level"));
    assert!(!class.can_set("upload_file_name"));
}

#[test]
fn settable_extends_base_attributes() {
    let class = JobClass::new("echo").settable(["upload_file_name"]);
    assert!(class.can_set("upload_file_name"));
    assert!(class.can_set("priority"));
}

#[test]
fn registry_register_and_get() {
    let registry = JobRegistry::new();
    registry.register(echo_class());

    assert!(registry.contains("echo"));
    assert!(registry.get("echo").is_some());
    assert!(registry.get("missing").is_none());
}

#[test]
fn register_replaces_previous_class() {
    let registry = JobRegistry::new();
    registry.register(JobClass::new("echo"));
    registry.register(echo_class());

    let class = registry.get("echo").unwrap();
    assert!(class.resolve("perform").is_some());
}
