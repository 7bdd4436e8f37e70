// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Drain state shared between the engine and its observers.

use std::sync::atomic::{AtomicU8, Ordering};

use tokio::sync::watch;

/// State values for the atomic state field.
pub const STATE_IDLE: u8 = 0;
pub const STATE_DRAINING: u8 = 1;

/// Whether a drain is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Draining,
}

impl std::fmt::Display for SyncState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncState::Idle => write!(f, "idle"),
            SyncState::Draining => write!(f, "draining"),
        }
    }
}

/// Drain state visible to the engine and to UI observers.
///
/// The state itself is an atomic so the in-flight check is a single
/// compare-and-set. The watch channel mirrors it as a "syncing" signal.
pub struct SharedSyncState {
    state: AtomicU8,
    syncing_tx: watch::Sender<bool>,
}

impl SharedSyncState {
    /// Create a new shared state initialized to idle.
    pub fn new() -> Self {
        let (syncing_tx, _) = watch::channel(false);
        Self {
            state: AtomicU8::new(STATE_IDLE),
            syncing_tx,
        }
    }

    /// Get the current state.
    pub fn get(&self) -> SyncState {
        match self.state.load(Ordering::Acquire) {
            STATE_DRAINING => SyncState::Draining,
            _ => SyncState::Idle,
        }
    }

    /// Check if a drain is running.
    pub fn is_draining(&self) -> bool {
        self.get() == SyncState::Draining
    }

    /// Subscribe to the syncing signal.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.syncing_tx.subscribe()
    }

    /// Move from idle to draining.
    ///
    /// Returns `None` if a drain is already running. The returned guard moves
    /// the state back to idle when dropped, on every exit path.
    pub fn try_begin(&self) -> Option<DrainGuard<'_>> {
        self.state
            .compare_exchange(STATE_IDLE, STATE_DRAINING, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        self.syncing_tx.send_replace(true);
        Some(DrainGuard { shared: self })
    }
}

impl Default for SharedSyncState {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the draining state for the lifetime of one drain.
pub struct DrainGuard<'a> {
    shared: &'a SharedSyncState,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.shared.state.store(STATE_IDLE, Ordering::Release);
        self.shared.syncing_tx.send_replace(false);
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
