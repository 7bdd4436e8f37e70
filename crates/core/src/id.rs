// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local task identifiers.
//!
//! A local ID is a random (v4) UUID in its hyphenated lowercase form. It is
//! assigned on creation and never changes, so it stays the primary key for a
//! task whether or not the remote has assigned a server ID yet.

use uuid::Uuid;

/// Number of leading characters shown when a task ID is abbreviated.
pub const SHORT_ID_LEN: usize = 8;

/// Generate a fresh local task ID.
pub fn generate_local_id() -> String {
    Uuid::new_v4().to_string()
}

/// Abbreviate a local ID for display.
pub fn short_id(local_id: &str) -> &str {
    match local_id.char_indices().nth(SHORT_ID_LEN) {
        Some((idx, _)) => &local_id[..idx],
        None => local_id,
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
