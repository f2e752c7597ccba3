// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::test_helpers::fixture;
use sw_core::test_support::queued_job;
use sw_core::{Job, JobState, SubState};
use sw_storage::JobStore;

#[test]
fn claims_a_queued_job() {
    let f = fixture();
    f.clock.set_epoch_ms(5_000);
    let job = queued_job("echo", 50, 1_000);
    f.store.insert(&job).unwrap();

    let claimed = f.runtime.next_job("w1", &[]).unwrap().unwrap();
    assert_eq!(claimed.id, job.id);
    assert_eq!(claimed.state, JobState::Running);
    assert_eq!(claimed.worker_name.as_deref(), Some("w1"));
    assert_eq!(claimed.started_at_ms, Some(5_000));

    let stored = f.store.get(&job.id).unwrap().unwrap();
    assert_eq!(stored.state, JobState::Running);
    assert_eq!(stored.worker_name.as_deref(), Some("w1"));
    assert_eq!(stored.started_at_ms, Some(5_000));
}

#[test]
fn empty_store_returns_none() {
    let f = fixture();
    assert!(f.runtime.next_job("w1", &[]).unwrap().is_none());
}

#[test]
fn claims_in_priority_then_created_at_order() {
    let f = fixture();
    f.clock.set_epoch_ms(5_000);
    let j1 = queued_job("echo", 70, 1_000);
    let j2 = queued_job("echo", 30, 1_001);
    let j3 = queued_job("echo", 30, 1_000);
    for job in [&j1, &j2, &j3] {
        f.store.insert(job).unwrap();
    }

    let order: Vec<_> = (0..3)
        .map(|_| f.runtime.next_job("w1", &[]).unwrap().unwrap().id)
        .collect();
    assert_eq!(order, vec![j3.id, j2.id, j1.id]);
}

#[test]
fn destroys_expired_jobs_and_keeps_looking() {
    let f = fixture();
    f.clock.set_epoch_ms(5_000);
    let mut expired = queued_job("echo", 10, 1_000);
    expired.expires_at_ms = Some(2_000);
    let live = queued_job("echo", 50, 1_000);
    f.store.insert(&expired).unwrap();
    f.store.insert(&live).unwrap();

    let claimed = f.runtime.next_job("w1", &[]).unwrap().unwrap();
    assert_eq!(claimed.id, live.id);
    assert!(f.store.get(&expired.id).unwrap().is_none());
}

#[test]
fn expired_only_store_returns_none() {
    let f = fixture();
    f.clock.set_epoch_ms(5_000);
    let mut expired = queued_job("echo", 10, 1_000);
    expired.expires_at_ms = Some(2_000);
    f.store.insert(&expired).unwrap();

    assert!(f.runtime.next_job("w1", &[]).unwrap().is_none());
    assert!(f.store.get(&expired.id).unwrap().is_none());
}

#[test]
fn joins_processing_job_without_restarting() {
    let f = fixture();
    f.clock.set_epoch_ms(5_000);
    let batch = Job::builder()
        .state(JobState::Running)
        .sub_state(SubState::Processing)
        .worker_name("w0")
        .started_at_ms(700u64)
        .build();
    f.store.insert(&batch).unwrap();

    let joined = f.runtime.next_job("w1", &[]).unwrap().unwrap();
    assert_eq!(joined.id, batch.id);
    assert_eq!(joined.worker_name.as_deref(), Some("w1"));
    // started_at is from the original start, not this claim.
    assert_eq!(joined.started_at_ms, Some(700));

    let stored = f.store.get(&batch.id).unwrap().unwrap();
    assert_eq!(stored.started_at_ms, Some(700));
    assert_eq!(stored.worker_name.as_deref(), Some("w1"));
}

#[test]
fn skip_ids_exclude_jobs_from_lookup() {
    let f = fixture();
    f.clock.set_epoch_ms(5_000);
    let a = queued_job("echo", 10, 1_000);
    let b = queued_job("echo", 50, 1_000);
    f.store.insert(&a).unwrap();
    f.store.insert(&b).unwrap();

    let claimed = f
        .runtime
        .next_job("w1", &[a.id.clone()])
        .unwrap()
        .unwrap();
    assert_eq!(claimed.id, b.id);
}

#[test]
fn future_run_at_waits_for_the_clock() {
    let f = fixture();
    f.clock.set_epoch_ms(5_000);
    let mut scheduled = queued_job("echo", 50, 1_000);
    scheduled.run_at_ms = Some(8_000);
    f.store.insert(&scheduled).unwrap();

    assert!(f.runtime.next_job("w1", &[]).unwrap().is_none());

    f.clock.set_epoch_ms(8_000);
    let claimed = f.runtime.next_job("w1", &[]).unwrap().unwrap();
    assert_eq!(claimed.id, scheduled.id);
}
