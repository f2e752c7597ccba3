// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dirmon error type.

use crate::validate::ValidationError;
use std::path::PathBuf;
use sw_storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirmonError {
    /// A filesystem path required by a whitelist or archive operation
    /// does not exist (or could not be created).
    #[error("no such path: {}", path.display())]
    NoSuchPath { path: PathBuf },

    #[error("io failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Save-time validation failures, one per offending field.
    #[error("validation failed: {}", format_errors(.0))]
    Invalid(Vec<ValidationError>),

    #[error("upload payload could not be serialized: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    Job(#[from] sw_core::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
