// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types shared by the job and dirmon state machines.

use thiserror::Error;

/// Failure raised by a registered job handler (perform or a lifecycle hook).
///
/// Carries the user-facing error class name so the persisted exception
/// record can report it without holding the original error value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{class_name}: {message}")]
pub struct PerformError {
    pub class_name: String,
    pub message: String,
}

impl PerformError {
    pub fn new(class_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// The state machine rejected an event; persisted state is unchanged.
    #[error("invalid transition: cannot {event} from {state}")]
    InvalidTransition { state: String, event: String },

    /// Precondition violation, e.g. `work` on a job that is not running.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Unknown option or invalid caller-supplied data.
    #[error("bad argument: {0}")]
    BadArgument(String),

    #[error(transparent)]
    Perform(#[from] PerformError),
}

impl Error {
    /// Short name identifying the error kind in exception records.
    pub fn class_name(&self) -> &str {
        match self {
            Error::InvalidTransition { .. } => "InvalidTransition",
            Error::InvalidState(_) => "InvalidState",
            Error::BadArgument(_) => "BadArgument",
            Error::Perform(e) => &e.class_name,
        }
    }

    /// Human-readable message without the class name prefix.
    pub fn message(&self) -> String {
        match self {
            Error::Perform(e) => e.message.clone(),
            other => other.to_string(),
        }
    }
}
