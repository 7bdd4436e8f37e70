// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::sync::RemoteError;

/// All possible errors that can occur in the tqrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("task not found: {0}\n  hint: run 'taskq list' to see task IDs")]
    TaskNotFound(String),

    #[error("ambiguous task ID '{prefix}' matches: {}", matches.join(", "))]
    AmbiguousId {
        prefix: String,
        matches: Vec<String>,
    },

    #[error("{field} too long ({actual} chars, max {max})")]
    FieldTooLong {
        field: &'static str,
        actual: usize,
        max: usize,
    },

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("nothing to change\n  hint: pass --title and/or --description")]
    EmptyPatch,

    #[error("{0}")]
    InvalidRemoteUrl(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("could not determine a data directory\n  hint: pass --data-dir or set TASKQ_DATA_DIR")]
    NoDataDir,

    #[error("store error: {0}")]
    Store(tq_core::Error),

    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sync stopped after {applied} operation(s), {remaining} still queued: {reason}")]
    SyncHalted {
        applied: usize,
        remaining: usize,
        reason: String,
    },
}

/// A specialized Result type for tqrs operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<tq_core::Error> for Error {
    fn from(e: tq_core::Error) -> Self {
        match e {
            tq_core::Error::TaskNotFound(id) => Error::TaskNotFound(id),
            tq_core::Error::AmbiguousId { prefix, matches } => {
                Error::AmbiguousId { prefix, matches }
            }
            tq_core::Error::Io(e) => Error::Io(e),
            tq_core::Error::Json(e) => Error::Json(e),
            other => Error::Store(other),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
