// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Save-time validation of dirmon entries against the job-class registry.

use sw_core::{DirmonEntry, JobRegistry};
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate an entry; an empty list means it may be saved.
///
/// Registration in the registry is what marks a type as honoring the job
/// contract, so class resolution and contract inheritance collapse into
/// one lookup. Property keys must each name a settable attribute on the
/// resolved class.
pub fn validate(entry: &DirmonEntry, registry: &JobRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("pattern", &entry.pattern),
        ("job_class_name", &entry.job_class_name),
        ("archive_directory", &entry.archive_directory),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::new(field, "is required"));
        }
    }

    let class_name = entry.job_class_name.trim();
    if !class_name.is_empty() {
        match registry.get(class_name) {
            None => errors.push(ValidationError::new(
                "job_class_name",
                format!("'{class_name}' is not a registered job class"),
            )),
            Some(class) => {
                for key in entry.properties.keys() {
                    if !class.can_set(key) {
                        errors.push(ValidationError::new(
                            "properties",
                            format!(
                                "'{key}' is not a settable attribute on '{}'",
                                class.name()
                            ),
                        ));
                    }
                }
            }
        }
    }

    errors
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
