// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tq-core: Shared library for the taskq offline-first task tracker
//!
//! This crate provides the data model and the persisted collections the sync
//! engine reconciles: tasks, the pending-operation log, and the key-value
//! store both are written to.

pub mod clock;
pub mod error;
pub mod id;
pub mod op;
pub mod oplog;
pub mod store;
pub mod task;
pub mod tasks;

pub use clock::{ClockSource, MonotonicClock, SystemClock};
pub use error::{Error, Result};
pub use op::{Op, OpKind};
pub use oplog::OpLog;
pub use store::{FileStore, LocalStore, MemoryStore, OPS_KEY, TASKS_KEY};
pub use task::{ServerId, Task, TaskPatch};
pub use tasks::TaskStore;
