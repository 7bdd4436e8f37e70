// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Task records and partial updates.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::short_id;

/// Identifier assigned by the remote once a task has been created there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerId(pub u64);

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ServerId {
    fn from(id: u64) -> Self {
        ServerId(id)
    }
}

/// One to-do item as seen on this device.
///
/// `server_id` is present only once a create for this task has been confirmed
/// by the remote. `synced` is true when the local state matches the last
/// operation the remote confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub local_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<ServerId>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub synced: bool,
}

impl Task {
    /// Creates a new, never-synced, incomplete task.
    pub fn new(
        local_id: String,
        title: String,
        description: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Task {
            local_id,
            server_id: None,
            title,
            description: description.filter(|d| !d.is_empty()),
            completed: false,
            updated_at,
            synced: false,
        }
    }

    /// Applies a patch, stamps the mutation time and marks the task unsynced.
    pub fn apply(&mut self, patch: &TaskPatch, updated_at: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            // Empty clears.
            self.description = if description.is_empty() {
                None
            } else {
                Some(description.clone())
            };
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = updated_at;
        self.synced = false;
    }

    /// Returns the abbreviated local ID used for display.
    pub fn short_id(&self) -> &str {
        short_id(&self.local_id)
    }
}

/// A partial update to a task's user-visible fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Patch that only changes the title.
    pub fn title(title: impl Into<String>) -> Self {
        TaskPatch {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Patch that only changes the completed flag.
    pub fn completed(completed: bool) -> Self {
        TaskPatch {
            completed: Some(completed),
            ..Default::default()
        }
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
