// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store gateway error type.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("document not found: {id}")]
    NotFound { id: String },

    #[error("document already exists: {id}")]
    DuplicateId { id: String },

    /// The unique index on dirmon `pattern` rejected a write.
    #[error("a dirmon entry already scans pattern '{pattern}'")]
    DuplicatePattern { pattern: String },

    /// Failure reported by a concrete store backend.
    #[error("store backend failure: {0}")]
    Backend(String),
}
