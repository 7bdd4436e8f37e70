// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pending remote mutations.
//!
//! Every local change to a task produces one [`Op`] describing the remote
//! effect it still needs. Ops are queued in the [`OpLog`](crate::OpLog) and
//! replayed against the remote in the order they were recorded.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::task::{ServerId, Task};

/// An operation waiting to be confirmed by the remote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Op {
    /// Create the task remotely. Carries the task as it was when created.
    Create { task: Task },

    /// Push the task's fields. Carries the task as it was after the edit.
    Update { task: Task },

    /// Delete the task remotely.
    #[serde(rename_all = "camelCase")]
    Delete {
        local_id: String,
        /// Absent if the task was never confirmed created remotely.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        server_id: Option<ServerId>,
    },
}

/// The kind of an operation, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Create,
    Update,
    Delete,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpKind::Create => write!(f, "create"),
            OpKind::Update => write!(f, "update"),
            OpKind::Delete => write!(f, "delete"),
        }
    }
}

impl Op {
    /// Creates a Create op from a task snapshot.
    pub fn create(task: Task) -> Self {
        Op::Create { task }
    }

    /// Creates an Update op from a task snapshot.
    pub fn update(task: Task) -> Self {
        Op::Update { task }
    }

    /// Creates a Delete op.
    pub fn delete(local_id: String, server_id: Option<ServerId>) -> Self {
        Op::Delete {
            local_id,
            server_id,
        }
    }

    /// Returns the kind of this op.
    pub fn kind(&self) -> OpKind {
        match self {
            Op::Create { .. } => OpKind::Create,
            Op::Update { .. } => OpKind::Update,
            Op::Delete { .. } => OpKind::Delete,
        }
    }

    /// Returns the local ID of the task this op affects.
    pub fn local_id(&self) -> &str {
        match self {
            Op::Create { task } | Op::Update { task } => &task.local_id,
            Op::Delete { local_id, .. } => local_id,
        }
    }

    /// Returns the server ID carried by this op, if any.
    pub fn server_id(&self) -> Option<ServerId> {
        match self {
            Op::Create { task } | Op::Update { task } => task.server_id,
            Op::Delete { server_id, .. } => *server_id,
        }
    }

    /// Fills in the server ID if this op targets `local_id` and has none yet.
    ///
    /// Returns true if the op was changed.
    pub fn bind_server_id(&mut self, local_id: &str, id: ServerId) -> bool {
        if self.local_id() != local_id {
            return false;
        }
        let slot = match self {
            Op::Create { task } | Op::Update { task } => &mut task.server_id,
            Op::Delete { server_id, .. } => server_id,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(id);
        true
    }
}

#[cfg(test)]
#[path = "op_tests.rs"]
mod tests;
