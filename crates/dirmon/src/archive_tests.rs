// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::path::Path;
use sw_core::{DirmonEntry, JobId};

fn entry_with_archive(dir: &str) -> DirmonEntry {
    let mut entry = DirmonEntry::new("imports", "/input/*.csv", "test_job");
    entry.archive_directory = dir.to_string();
    entry
}

#[test]
fn relative_archive_directory_resolves_against_parent() {
    let entry = entry_with_archive("archive");
    let resolved = archive_pathname(&entry, Path::new("/input/a.csv"));
    assert_eq!(resolved, Path::new("/input/archive"));
}

#[test]
fn absolute_archive_directory_is_used_as_is() {
    let entry = entry_with_archive("/var/archive");
    let resolved = archive_pathname(&entry, Path::new("/input/a.csv"));
    assert_eq!(resolved, Path::new("/var/archive"));
}

#[test]
fn archive_file_moves_and_renames() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("a.csv");
    std::fs::write(&source, "x,y\n1,2\n").unwrap();

    let entry = entry_with_archive("archive");
    let job_id = JobId::from_string("job-fixed");
    let target = archive_file(&entry, &job_id, &source).unwrap();

    assert!(!source.exists());
    assert!(target.exists());
    assert_eq!(target, dir.path().join("archive").join("job-fixed_a.csv"));
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "x,y\n1,2\n");
}

#[test]
fn archive_file_creates_nested_directories() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("a.csv");
    std::fs::write(&source, "data").unwrap();

    let entry = entry_with_archive("done/2026/08");
    let target = archive_file(&entry, &JobId::from_string("job-1"), &source).unwrap();
    assert!(target.starts_with(dir.path().join("done/2026/08")));
    assert!(target.exists());
}

#[test]
fn archive_file_into_absolute_directory() {
    let input = tempfile::tempdir().unwrap();
    let archive = tempfile::tempdir().unwrap();
    let source = input.path().join("a.csv");
    std::fs::write(&source, "data").unwrap();

    let entry = entry_with_archive(&archive.path().to_string_lossy());
    let target = archive_file(&entry, &JobId::from_string("job-1"), &source).unwrap();

    assert!(!source.exists());
    assert_eq!(target, archive.path().join("job-1_a.csv"));
}

#[test]
fn missing_source_surfaces_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let entry = entry_with_archive("archive");
    let missing = dir.path().join("gone.csv");

    let err = archive_file(&entry, &JobId::from_string("job-1"), &missing).unwrap_err();
    assert!(matches!(err, DirmonError::Io { .. }));
}
