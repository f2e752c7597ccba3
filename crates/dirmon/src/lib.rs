// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sw-dirmon: directory-monitoring producer.
//!
//! A dirmon entry is a persistent rule that discovers files on a schedule,
//! enforces path whitelisting, archives files atomically across
//! partitions, and enqueues a follow-on upload job. The periodic driver
//! that invokes scanning is external; this crate provides the rule's
//! lifecycle, scanning, archival, and enqueue operations.

mod archive;
mod error;
mod monitor;
mod upload;
mod validate;
mod whitelist;

pub use archive::{archive_file, archive_pathname};
pub use error::DirmonError;
pub use monitor::Dirmon;
pub use upload::{UploadFileJob, UPLOAD_JOB_CLASS};
pub use validate::{validate, ValidationError};
pub use whitelist::Whitelist;
