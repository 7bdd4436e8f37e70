// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The reconciled task collection.
//!
//! Every mutation computes the next collection, persists it in full under
//! [`TASKS_KEY`], and only then replaces the in-memory copy. A failed write
//! therefore leaves memory and disk agreeing on the previous state.

use std::sync::Arc;

use crate::clock::MonotonicClock;
use crate::error::{Error, Result};
use crate::id::generate_local_id;
use crate::store::{load_json, save_json, LocalStore, TASKS_KEY};
use crate::task::{ServerId, Task, TaskPatch};

/// In-memory task list mirrored to a [`LocalStore`].
pub struct TaskStore {
    store: Arc<dyn LocalStore>,
    clock: MonotonicClock,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Loads the persisted collection (empty if nothing was stored yet).
    pub fn load(store: Arc<dyn LocalStore>) -> Result<Self> {
        Self::load_with_clock(store, MonotonicClock::new())
    }

    /// Loads the persisted collection using a custom clock.
    ///
    /// The clock is advanced past the newest `updatedAt` on disk so timestamps
    /// keep increasing across restarts.
    pub fn load_with_clock(store: Arc<dyn LocalStore>, clock: MonotonicClock) -> Result<Self> {
        let tasks: Vec<Task> = load_json(store.as_ref(), TASKS_KEY)?.unwrap_or_default();
        if let Some(latest) = tasks.iter().map(|t| t.updated_at).max() {
            clock.observe(latest);
        }
        Ok(TaskStore {
            store,
            clock,
            tasks,
        })
    }

    /// Returns the current tasks, newest first.
    pub fn snapshot(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if there are no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a task by local ID.
    pub fn get(&self, local_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.local_id == local_id)
    }

    /// Tasks not yet completed.
    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }

    /// Completed tasks.
    pub fn completed(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.completed)
    }

    /// Creates a task with a fresh local ID and inserts it at the front.
    pub fn create(&mut self, title: impl Into<String>, description: Option<String>) -> Result<Task> {
        let task = Task::new(generate_local_id(), title.into(), description, self.clock.now());

        let mut next = Vec::with_capacity(self.tasks.len() + 1);
        next.push(task.clone());
        next.extend(self.tasks.iter().cloned());

        self.commit(next)?;
        Ok(task)
    }

    /// Applies a patch to a task.
    ///
    /// Returns `Ok(None)` without writing anything if the task does not exist.
    pub fn update(&mut self, local_id: &str, patch: &TaskPatch) -> Result<Option<Task>> {
        let Some(idx) = self.position(local_id) else {
            return Ok(None);
        };

        let mut next = self.tasks.clone();
        next[idx].apply(patch, self.clock.now());
        let updated = next[idx].clone();

        self.commit(next)?;
        Ok(Some(updated))
    }

    /// Removes a task, returning it if it existed.
    pub fn delete(&mut self, local_id: &str) -> Result<Option<Task>> {
        let Some(idx) = self.position(local_id) else {
            return Ok(None);
        };

        let mut next = self.tasks.clone();
        let removed = next.remove(idx);

        self.commit(next)?;
        Ok(Some(removed))
    }

    /// Records the outcome of a confirmed remote operation.
    ///
    /// Sets the server ID when one is given and sets the `synced` flag. Does
    /// not touch `updatedAt`: this is not a user mutation. Returns `Ok(None)`
    /// if the task no longer exists.
    pub fn reconcile(
        &mut self,
        local_id: &str,
        server_id: Option<ServerId>,
        synced: bool,
    ) -> Result<Option<Task>> {
        let Some(idx) = self.position(local_id) else {
            return Ok(None);
        };

        let current = &self.tasks[idx];
        let server_id = server_id.or(current.server_id);
        if current.server_id == server_id && current.synced == synced {
            return Ok(Some(current.clone()));
        }

        let mut next = self.tasks.clone();
        next[idx].server_id = server_id;
        next[idx].synced = synced;
        let reconciled = next[idx].clone();

        self.commit(next)?;
        Ok(Some(reconciled))
    }

    /// Replaces the whole collection.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> Result<()> {
        self.commit(tasks)
    }

    /// Resolves a task from a full local ID or a unique prefix of one.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<&Task> {
        if prefix.is_empty() {
            return Err(Error::TaskNotFound(prefix.to_string()));
        }
        if let Some(task) = self.get(prefix) {
            return Ok(task);
        }

        let matches: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.local_id.starts_with(prefix))
            .collect();

        match matches.as_slice() {
            [task] => Ok(task),
            [] => Err(Error::TaskNotFound(prefix.to_string())),
            _ => Err(Error::AmbiguousId {
                prefix: prefix.to_string(),
                matches: matches.iter().map(|t| t.local_id.clone()).collect(),
            }),
        }
    }

    fn position(&self, local_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.local_id == local_id)
    }

    fn commit(&mut self, next: Vec<Task>) -> Result<()> {
        save_json(self.store.as_ref(), TASKS_KEY, &next)?;
        self.tasks = next;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
