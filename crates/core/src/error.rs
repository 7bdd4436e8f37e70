// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tq-core operations.

use thiserror::Error;

/// All possible errors that can occur in tq-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("ambiguous task ID '{prefix}' matches: {}", matches.join(", "))]
    AmbiguousId {
        prefix: String,
        matches: Vec<String>,
    },

    #[error("invalid storage key: '{0}'\n  hint: keys may only contain letters, digits, '_' and '-'")]
    InvalidKey(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data under '{key}': {reason}")]
    CorruptedData { key: String, reason: String },

    #[error("storage error: {0}")]
    Storage(String),
}

/// A specialized Result type for tq-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
