// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline-first sync with a remote task collection.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  SyncEngine  │────►│ RemoteClient │────►│   Remote    │
//! │   (drain)    │◄────│   (trait)    │◄────│  REST API   │
//! └──────────────┘     └──────────────┘     └─────────────┘
//!     │      ▲
//!     ▼      │ online / offline
//! ┌────────┐ ┌──────────────┐
//! │ OpLog  │ │ Connectivity │◄── ReachabilityProber
//! │ Tasks  │ └──────────────┘
//! └────────┘
//! ```
//!
//! # Features
//!
//! - Local mutations persist immediately and queue an op
//! - Strict FIFO replay that halts at the first failure
//! - At most one drain at a time, with an observable syncing signal
//! - Drains on reconnect and after local mutations while online
//! - Injectable remote trait for testing

mod connectivity;
mod engine;
mod remote;
mod state;

pub use connectivity::{Connectivity, ProbeConfig, ProbeStatus, ReachabilityProber};
pub use engine::{DrainOutcome, DrainTriggers, SyncEngine, SyncError};
pub use remote::{
    HttpRemote, NewRemoteTask, Probe, RemoteClient, RemoteError, RemoteFuture, RemotePatch,
    RemoteResult,
};
pub use state::{SharedSyncState, SyncState};

#[cfg(test)]
pub(crate) mod test_helpers;
