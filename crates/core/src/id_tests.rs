// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::job::JobId;

#[test]
fn generated_ids_carry_prefix() {
    let id = JobId::new();
    assert!(id.as_str().starts_with(JobId::PREFIX));
    assert_eq!(id.as_str().len(), JobId::PREFIX.len() + 19);
}

#[test]
fn generated_ids_are_unique() {
    let a = JobId::new();
    let b = JobId::new();
    assert_ne!(a, b);
}

#[test]
fn from_string_roundtrips() {
    let id = JobId::from_string("job-fixed");
    assert_eq!(id, "job-fixed");
    assert_eq!(id.suffix(), "fixed");
}

#[test]
fn suffix_without_prefix_is_whole_string() {
    let id = JobId::from_string("custom");
    assert_eq!(id.suffix(), "custom");
}

#[test]
fn id_serde_is_transparent() {
    let id = JobId::from_string("job-abc");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"job-abc\"");

    let parsed: JobId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}
