// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use sw_core::test_support::queued_job;
use sw_core::Exception;

fn claim<'a>(now_ms: u64, skip_ids: &'a [JobId]) -> ClaimQuery<'a> {
    ClaimQuery { now_ms, skip_ids }
}

const W1: ClaimUpdate<'static> = ClaimUpdate { worker_name: "w1" };

#[test]
fn insert_and_get_roundtrip() {
    let store = MemoryStore::new();
    let job = queued_job("test_job", 50, 1_000);
    let id = store.insert(&job).unwrap();

    let loaded = store.get(&id).unwrap().unwrap();
    assert_eq!(loaded.id, job.id);
    assert_eq!(loaded.priority, 50);
    assert!(loaded.persisted);
}

#[test]
fn insert_rejects_duplicate_id() {
    let store = MemoryStore::new();
    let job = queued_job("test_job", 50, 1_000);
    store.insert(&job).unwrap();

    let err = store.insert(&job).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId { .. }));
}

#[test]
fn find_and_modify_returns_pre_image_and_claims() {
    let store = MemoryStore::new();
    let job = queued_job("test_job", 50, 1_000);
    store.insert(&job).unwrap();

    let pre = store.find_and_modify(&claim(5_000, &[]), &W1).unwrap().unwrap();
    assert_eq!(pre.state, JobState::Queued);
    assert!(pre.worker_name.is_none());

    let post = store.get(&job.id).unwrap().unwrap();
    assert_eq!(post.state, JobState::Running);
    assert_eq!(post.worker_name.as_deref(), Some("w1"));
}

#[test]
fn find_and_modify_orders_by_priority_then_created_at() {
    let store = MemoryStore::new();
    let low = queued_job("test_job", 70, 1_000);
    let late = queued_job("test_job", 30, 2_000);
    let early = queued_job("test_job", 30, 1_000);
    store.insert(&low).unwrap();
    store.insert(&late).unwrap();
    store.insert(&early).unwrap();

    let first = store.find_and_modify(&claim(5_000, &[]), &W1).unwrap().unwrap();
    let second = store.find_and_modify(&claim(5_000, &[]), &W1).unwrap().unwrap();
    let third = store.find_and_modify(&claim(5_000, &[]), &W1).unwrap().unwrap();

    assert_eq!(first.id, early.id);
    assert_eq!(second.id, late.id);
    assert_eq!(third.id, low.id);
    assert!(store.find_and_modify(&claim(5_000, &[]), &W1).unwrap().is_none());
}

#[test]
fn equal_sort_keys_fall_back_to_storage_order() {
    let store = MemoryStore::new();
    let a = queued_job("test_job", 50, 1_000);
    let b = queued_job("test_job", 50, 1_000);
    store.insert(&a).unwrap();
    store.insert(&b).unwrap();

    let first = store.find_and_modify(&claim(5_000, &[]), &W1).unwrap().unwrap();
    assert_eq!(first.id, a.id);
}

#[test]
fn future_run_at_is_not_claimable() {
    let store = MemoryStore::new();
    let mut job = queued_job("test_job", 50, 1_000);
    job.run_at_ms = Some(9_000);
    store.insert(&job).unwrap();

    assert!(store.find_and_modify(&claim(5_000, &[]), &W1).unwrap().is_none());
    assert!(store.find_and_modify(&claim(9_000, &[]), &W1).unwrap().is_some());
}

#[test]
fn skip_ids_are_excluded() {
    let store = MemoryStore::new();
    let job = queued_job("test_job", 50, 1_000);
    store.insert(&job).unwrap();

    let skip = [job.id.clone()];
    assert!(store.find_and_modify(&claim(5_000, &skip), &W1).unwrap().is_none());
    assert!(store.find_and_modify(&claim(5_000, &[]), &W1).unwrap().is_some());
}

#[test]
fn running_processing_jobs_match_the_sub_state_branch() {
    let store = MemoryStore::new();
    let batch = Job::builder()
        .state(JobState::Running)
        .sub_state(SubState::Processing)
        .worker_name("w0")
        .started_at_ms(500u64)
        .build();
    let plain_running = Job::builder().state(JobState::Running).worker_name("w0").build();
    store.insert(&batch).unwrap();
    store.insert(&plain_running).unwrap();

    let pre = store.find_and_modify(&claim(5_000, &[]), &W1).unwrap().unwrap();
    assert_eq!(pre.id, batch.id);
    assert_eq!(pre.state, JobState::Running);

    // The processing job stays claimable for further workers; the plain
    // running job never matches.
    let skip = [batch.id.clone()];
    assert!(store.find_and_modify(&claim(5_000, &skip), &W1).unwrap().is_none());
}

#[test]
fn update_applies_partial_patch() {
    let store = MemoryStore::new();
    let job = queued_job("test_job", 50, 1_000);
    store.insert(&job).unwrap();

    let patch = JobPatch::new()
        .state(JobState::Failed)
        .clear_worker()
        .exception(Exception::new("w1", "RuntimeError", "boom"));
    store.update(&job.id, &patch).unwrap();

    let loaded = store.get(&job.id).unwrap().unwrap();
    assert_eq!(loaded.state, JobState::Failed);
    assert!(loaded.worker_name.is_none());
    assert_eq!(loaded.exception.unwrap().message, "boom");
    // Untouched fields survive.
    assert_eq!(loaded.priority, 50);
}

#[test]
fn update_missing_job_is_not_found() {
    let store = MemoryStore::new();
    let err = store
        .update(&JobId::from_string("job-missing"), &JobPatch::new())
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn destroy_removes_the_document() {
    let store = MemoryStore::new();
    let job = queued_job("test_job", 50, 1_000);
    store.insert(&job).unwrap();

    store.destroy(&job.id).unwrap();
    assert!(store.get(&job.id).unwrap().is_none());
    assert!(matches!(
        store.destroy(&job.id),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn entry_pattern_unique_index() {
    let store = MemoryStore::new();
    let a = DirmonEntry::new("a", "/input/*.csv", "test_job");
    let b = DirmonEntry::new("b", "/input/*.csv", "test_job");
    store.insert_entry(&a).unwrap();

    let err = store.insert_entry(&b).unwrap_err();
    assert!(matches!(err, StoreError::DuplicatePattern { .. }));
}

#[test]
fn entry_update_checks_pattern_uniqueness() {
    let store = MemoryStore::new();
    let a = DirmonEntry::new("a", "/input/*.csv", "test_job");
    let mut b = DirmonEntry::new("b", "/other/*.csv", "test_job");
    store.insert_entry(&a).unwrap();
    store.insert_entry(&b).unwrap();

    b.pattern = "/input/*.csv".to_string();
    let err = store.update_entry(&b).unwrap_err();
    assert!(matches!(err, StoreError::DuplicatePattern { .. }));

    b.pattern = "/other/*.json".to_string();
    store.update_entry(&b).unwrap();
}

#[test]
fn counts_by_state_omits_missing_states() {
    let store = MemoryStore::new();
    let mut enabled = DirmonEntry::new("a", "/a/*", "test_job");
    enabled.enable().unwrap();
    store.insert_entry(&enabled).unwrap();
    store
        .insert_entry(&DirmonEntry::new("b", "/b/*", "test_job"))
        .unwrap();
    store
        .insert_entry(&DirmonEntry::new("c", "/c/*", "test_job"))
        .unwrap();

    let counts = store.counts_by_state().unwrap();
    assert_eq!(counts.get(&EntryState::Pending), Some(&2));
    assert_eq!(counts.get(&EntryState::Enabled), Some(&1));
    assert_eq!(counts.get(&EntryState::Disabled), None);
    assert_eq!(counts.values().sum::<usize>(), store.entries().unwrap().len());
}

proptest! {
    /// Sequential drains always observe (priority asc, created_at asc) order.
    #[test]
    fn drain_order_is_sorted(specs in proptest::collection::vec((0i32..100, 0u64..1_000), 1..20)) {
        let store = MemoryStore::new();
        for (priority, created_at_ms) in &specs {
            store.insert(&queued_job("test_job", *priority, *created_at_ms)).unwrap();
        }

        let mut drained = Vec::new();
        while let Some(job) = store.find_and_modify(&claim(10_000, &[]), &W1).unwrap() {
            drained.push((job.priority, job.created_at_ms));
        }

        prop_assert_eq!(drained.len(), specs.len());
        let mut sorted = drained.clone();
        sorted.sort();
        prop_assert_eq!(drained, sorted);
    }
}
