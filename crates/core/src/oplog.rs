// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered log of operations awaiting remote confirmation.
//!
//! Ops are appended in the order local mutations happen and removed only from
//! the front, once the remote has confirmed them. Every structural change
//! rewrites the whole log under [`OPS_KEY`] before the in-memory copy changes:
//! losing this log after a crash would silently drop pending remote writes.

use std::sync::Arc;

use crate::error::Result;
use crate::op::Op;
use crate::store::{load_json, save_json, LocalStore, OPS_KEY};
use crate::task::ServerId;

/// FIFO queue of pending [`Op`]s persisted to a [`LocalStore`].
pub struct OpLog {
    store: Arc<dyn LocalStore>,
    ops: Vec<Op>,
}

impl OpLog {
    /// Loads the persisted log (empty if nothing was stored yet).
    pub fn load(store: Arc<dyn LocalStore>) -> Result<Self> {
        let ops: Vec<Op> = load_json(store.as_ref(), OPS_KEY)?.unwrap_or_default();
        Ok(OpLog { store, ops })
    }

    /// Appends an op to the back of the log.
    pub fn append(&mut self, op: Op) -> Result<()> {
        let mut next = self.ops.clone();
        next.push(op);
        self.commit(next)
    }

    /// Returns all queued ops in order without removing them.
    pub fn peek_all(&self) -> &[Op] {
        &self.ops
    }

    /// Returns the op at the front of the log.
    pub fn front(&self) -> Option<&Op> {
        self.ops.first()
    }

    /// Removes the first `count` ops.
    ///
    /// Call this only after the remote has confirmed them.
    pub fn commit_prefix(&mut self, count: usize) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        let next = self.ops.iter().skip(count).cloned().collect();
        self.commit(next)
    }

    /// Replaces the whole log.
    pub fn replace_all(&mut self, ops: Vec<Op>) -> Result<()> {
        self.commit(ops)
    }

    /// Gives every queued op for `local_id` that lacks a server ID the one the
    /// remote just assigned.
    ///
    /// Returns the number of ops rewritten. Nothing is written if none changed.
    pub fn bind_server_id(&mut self, local_id: &str, id: ServerId) -> Result<usize> {
        let mut next = self.ops.clone();
        let bound = next
            .iter_mut()
            .map(|op| op.bind_server_id(local_id, id))
            .filter(|changed| *changed)
            .count();
        if bound > 0 {
            self.commit(next)?;
        }
        Ok(bound)
    }

    /// Returns true if an op behind the head targets `local_id`.
    pub fn has_pending_after_head(&self, local_id: &str) -> bool {
        self.ops.iter().skip(1).any(|op| op.local_id() == local_id)
    }

    /// Returns the number of queued ops.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    fn commit(&mut self, next: Vec<Op>) -> Result<()> {
        save_json(self.store.as_ref(), OPS_KEY, &next)?;
        self.ops = next;
        Ok(())
    }
}

#[cfg(test)]
#[path = "oplog_tests.rs"]
mod tests;
