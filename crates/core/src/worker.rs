// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker host handle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a worker host, passed to the execution contract.
///
/// The host loop owns the lifecycle; this record only carries the name the
/// dispatcher writes into claimed jobs and a started marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub name: String,
    pub started: bool,
}

impl Worker {
    /// Name used by the factory's synchronous execution path.
    pub const INLINE: &'static str = "inline";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            started: false,
        }
    }

    /// Fabricate the pre-started worker used by `now`.
    pub fn inline() -> Self {
        Self {
            name: Self::INLINE.to_string(),
            started: true,
        }
    }
}

impl fmt::Display for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
