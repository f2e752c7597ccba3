// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine error type.

use sw_storage::StoreError;
use thiserror::Error;

/// Failure surfaced by a dispatcher, execution, or factory operation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Job state machine or handler failure.
    #[error(transparent)]
    Job(#[from] sw_core::Error),

    /// Store gateway failure, propagated as-is.
    #[error(transparent)]
    Store(#[from] StoreError),
}
