// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The sync engine: local mutations, the drain loop and its runner.
//!
//! Local mutations write the task collection, then append an [`Op`] to the
//! log, then request a drain. A drain replays the log against the remote
//! strictly front to back, one op at a time, and stops at the first failure
//! leaving that op and everything after it queued.
//!
//! The task collection and the log share one async mutex. It is held only
//! for local persistence and is released around every remote call, so local
//! mutations can interleave with a running drain. They only ever append to
//! the tail while the drain only removes from the head.

use std::sync::Arc;

use tokio::sync::{mpsc, watch, Mutex};
use tokio_util::sync::CancellationToken;
use tq_core::{LocalStore, Op, OpLog, ServerId, Task, TaskPatch, TaskStore};

use super::connectivity::Connectivity;
use super::remote::{NewRemoteTask, RemoteClient, RemoteError, RemotePatch};
use super::state::{SharedSyncState, SyncState};

/// Why a replayed op was not applied.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("local store: {0}")]
    Store(#[from] tq_core::Error),
}

/// Result of one call to [`SyncEngine::drain`].
#[derive(Debug)]
pub enum DrainOutcome {
    /// Another drain was running; nothing was done.
    AlreadyDraining,
    /// The log was emptied.
    Completed { applied: usize },
    /// Replay stopped at the op now at the head of the log.
    Halted {
        applied: usize,
        remaining: usize,
        error: SyncError,
    },
}

impl DrainOutcome {
    /// Number of ops confirmed and removed from the log.
    pub fn applied(&self) -> usize {
        match self {
            DrainOutcome::AlreadyDraining => 0,
            DrainOutcome::Completed { applied } | DrainOutcome::Halted { applied, .. } => *applied,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, DrainOutcome::Completed { .. })
    }
}

/// Receiving end of the engine's drain requests, consumed by [`SyncEngine::run`].
pub struct DrainTriggers {
    rx: mpsc::Receiver<()>,
}

struct Replica {
    tasks: TaskStore,
    log: OpLog,
}

impl Replica {
    /// Appends `op`, restoring the task collection to `previous` if the log
    /// write fails.
    fn queue(&mut self, op: Op, previous: Vec<Task>) -> tq_core::Result<()> {
        let Err(err) = self.log.append(op) else {
            return Ok(());
        };
        if let Err(restore) = self.tasks.replace_all(previous) {
            tracing::error!(error = %restore, "failed to restore tasks after op log write failure");
        }
        Err(err)
    }
}

/// Owns the task collection and the op log and keeps them in step with the
/// remote.
pub struct SyncEngine {
    replica: Mutex<Replica>,
    remote: Arc<dyn RemoteClient>,
    connectivity: Arc<Connectivity>,
    state: SharedSyncState,
    trigger_tx: mpsc::Sender<()>,
}

impl SyncEngine {
    /// Loads the persisted tasks and log from `store`.
    ///
    /// Returns the engine and the trigger receiver to hand to [`SyncEngine::run`].
    pub fn open(
        store: Arc<dyn LocalStore>,
        remote: Arc<dyn RemoteClient>,
        connectivity: Arc<Connectivity>,
    ) -> tq_core::Result<(Arc<Self>, DrainTriggers)> {
        let tasks = TaskStore::load(Arc::clone(&store))?;
        Self::with_tasks(tasks, store, remote, connectivity)
    }

    /// Like [`SyncEngine::open`] with an already loaded task collection.
    pub fn with_tasks(
        tasks: TaskStore,
        store: Arc<dyn LocalStore>,
        remote: Arc<dyn RemoteClient>,
        connectivity: Arc<Connectivity>,
    ) -> tq_core::Result<(Arc<Self>, DrainTriggers)> {
        let log = OpLog::load(store)?;
        if !log.is_empty() {
            tracing::info!(queued = log.len(), "resuming with queued operations");
        }

        // A single slot: a full channel means a drain is already requested.
        let (trigger_tx, rx) = mpsc::channel(1);
        let engine = Arc::new(SyncEngine {
            replica: Mutex::new(Replica { tasks, log }),
            remote,
            connectivity,
            state: SharedSyncState::new(),
            trigger_tx,
        });
        Ok((engine, DrainTriggers { rx }))
    }

    // -- Local mutations --------------------------------------------------

    /// Creates a task and queues its creation.
    pub async fn add_task(
        &self,
        title: impl Into<String>,
        description: Option<String>,
    ) -> tq_core::Result<Task> {
        let task = {
            let mut replica = self.replica.lock().await;
            let previous = replica.tasks.snapshot().to_vec();
            let task = replica.tasks.create(title, description)?;
            replica.queue(Op::create(task.clone()), previous)?;
            task
        };
        tracing::debug!(local_id = %task.local_id, "task created");
        self.request_drain();
        Ok(task)
    }

    /// Applies `patch` to a task and queues the update.
    ///
    /// Returns `Ok(None)` and queues nothing if the task does not exist.
    pub async fn update_task(&self, local_id: &str, patch: &TaskPatch) -> tq_core::Result<Option<Task>> {
        let updated = {
            let mut replica = self.replica.lock().await;
            let previous = replica.tasks.snapshot().to_vec();
            let Some(task) = replica.tasks.update(local_id, patch)? else {
                return Ok(None);
            };
            replica.queue(Op::update(task.clone()), previous)?;
            task
        };
        tracing::debug!(local_id = %updated.local_id, "task updated");
        self.request_drain();
        Ok(Some(updated))
    }

    /// Flips a task's completed flag.
    pub async fn toggle_task(&self, local_id: &str) -> tq_core::Result<Option<Task>> {
        let completed = {
            let replica = self.replica.lock().await;
            match replica.tasks.get(local_id) {
                Some(task) => task.completed,
                None => return Ok(None),
            }
        };
        self.update_task(local_id, &TaskPatch::completed(!completed)).await
    }

    /// Removes a task locally and queues the remote delete.
    ///
    /// Returns `Ok(None)` and queues nothing if the task does not exist.
    pub async fn delete_task(&self, local_id: &str) -> tq_core::Result<Option<Task>> {
        let removed = {
            let mut replica = self.replica.lock().await;
            let previous = replica.tasks.snapshot().to_vec();
            let Some(task) = replica.tasks.delete(local_id)? else {
                return Ok(None);
            };
            replica.queue(Op::delete(task.local_id.clone(), task.server_id), previous)?;
            task
        };
        tracing::debug!(local_id = %removed.local_id, "task deleted");
        self.request_drain();
        Ok(Some(removed))
    }

    /// Asks the runner for a drain if online. Never blocks.
    pub fn request_drain(&self) {
        if !self.connectivity.is_online() {
            return;
        }
        if let Err(mpsc::error::TrySendError::Closed(())) = self.trigger_tx.try_send(()) {
            tracing::trace!("no runner listening for drain requests");
        }
    }

    // -- Reads ------------------------------------------------------------

    /// All tasks, newest first.
    pub async fn tasks(&self) -> Vec<Task> {
        self.replica.lock().await.tasks.snapshot().to_vec()
    }

    pub async fn pending_tasks(&self) -> Vec<Task> {
        self.replica.lock().await.tasks.pending().cloned().collect()
    }

    pub async fn completed_tasks(&self) -> Vec<Task> {
        self.replica.lock().await.tasks.completed().cloned().collect()
    }

    /// Queued ops in replay order.
    pub async fn pending_ops(&self) -> Vec<Op> {
        self.replica.lock().await.log.peek_all().to_vec()
    }

    /// Resolves a task from a full local ID or a unique prefix.
    pub async fn resolve(&self, prefix: &str) -> tq_core::Result<Task> {
        self.replica.lock().await.tasks.find_by_prefix(prefix).cloned()
    }

    pub fn is_syncing(&self) -> bool {
        self.state.is_draining()
    }

    /// Subscribe to the syncing signal: true strictly while a drain runs.
    pub fn subscribe_syncing(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }

    pub fn sync_state(&self) -> SyncState {
        self.state.get()
    }

    pub fn connectivity(&self) -> &Arc<Connectivity> {
        &self.connectivity
    }

    // -- Drain ------------------------------------------------------------

    /// Replays queued ops against the remote until the log is empty or an op
    /// fails.
    ///
    /// At most one drain runs at a time; a call made while one is running
    /// returns [`DrainOutcome::AlreadyDraining`] without touching anything.
    pub async fn drain(&self) -> DrainOutcome {
        let Some(_guard) = self.state.try_begin() else {
            tracing::debug!("drain already in progress");
            return DrainOutcome::AlreadyDraining;
        };

        let mut applied = 0;
        loop {
            let Some(op) = self.replica.lock().await.log.front().cloned() else {
                break;
            };

            tracing::debug!(kind = %op.kind(), local_id = op.local_id(), "replaying op");
            if let Err(error) = self.replay(op).await {
                let remaining = self.replica.lock().await.log.len();
                tracing::warn!(applied, remaining, %error, "sync halted");
                return DrainOutcome::Halted {
                    applied,
                    remaining,
                    error,
                };
            }
            applied += 1;
        }

        if applied > 0 {
            tracing::info!(applied, "sync complete");
        }
        DrainOutcome::Completed { applied }
    }

    async fn replay(&self, op: Op) -> Result<(), SyncError> {
        match op {
            Op::Create { task } => {
                // A create whose task or op already carries an ID was confirmed
                // before the log write that would have removed it.
                let known = match task.server_id {
                    Some(id) => Some(id),
                    None => self.live_server_id(&task.local_id).await,
                };
                let id = match known {
                    Some(id) => {
                        tracing::debug!(local_id = %task.local_id, %id, "create already confirmed");
                        id
                    }
                    None => self.remote.create(NewRemoteTask::from(&task)).await?,
                };
                self.confirm(&task.local_id, Some(id)).await
            }
            Op::Update { task } => {
                let known = match task.server_id {
                    Some(id) => Some(id),
                    None => self.live_server_id(&task.local_id).await,
                };
                let id = match known {
                    Some(id) => {
                        self.remote.update(id, RemotePatch::from(&task)).await?;
                        id
                    }
                    None => {
                        tracing::debug!(local_id = %task.local_id, "no server id for update, creating");
                        self.remote.create(NewRemoteTask::from(&task)).await?
                    }
                };
                self.confirm(&task.local_id, Some(id)).await
            }
            Op::Delete {
                local_id,
                server_id,
            } => {
                match server_id {
                    Some(id) => self.remote.delete(id).await?,
                    None => tracing::debug!(%local_id, "never created remotely, skipping remote delete"),
                }
                let mut replica = self.replica.lock().await;
                replica.tasks.delete(&local_id)?;
                replica.log.commit_prefix(1)?;
                Ok(())
            }
        }
    }

    async fn live_server_id(&self, local_id: &str) -> Option<ServerId> {
        self.replica
            .lock()
            .await
            .tasks
            .get(local_id)
            .and_then(|t| t.server_id)
    }

    /// Records a confirmed create or update for the head op and removes it.
    ///
    /// The server ID reaches the log before the task is marked synced, so a
    /// head op left behind by a failed write is never created twice.
    async fn confirm(&self, local_id: &str, server_id: Option<ServerId>) -> Result<(), SyncError> {
        let mut replica = self.replica.lock().await;
        if let Some(id) = server_id {
            if let Err(err) = replica.log.bind_server_id(local_id, id) {
                // Keep the ID on the unsynced task; replay of the head op finds it there.
                if let Err(keep) = replica.tasks.reconcile(local_id, Some(id), false) {
                    tracing::error!(error = %keep, %id, "failed to record confirmed server id");
                }
                return Err(err.into());
            }
        }
        let latest = !replica.log.has_pending_after_head(local_id);
        replica.tasks.reconcile(local_id, server_id, latest)?;
        replica.log.commit_prefix(1)?;
        Ok(())
    }

    // -- Runner -----------------------------------------------------------

    /// Drains on every transition to online and on every drain request while
    /// online, until `shutdown` fires.
    pub async fn run(self: Arc<Self>, triggers: DrainTriggers, shutdown: CancellationToken) {
        let DrainTriggers { mut rx } = triggers;
        let mut online_rx = self.connectivity.subscribe();

        if *online_rx.borrow_and_update() {
            self.drain().await;
        }

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                changed = online_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    if *online_rx.borrow_and_update() {
                        self.drain().await;
                    }
                }
                trigger = rx.recv() => {
                    if trigger.is_none() {
                        break;
                    }
                    if self.connectivity.is_online() {
                        self.drain().await;
                    }
                }
            }
        }
        tracing::debug!("sync runner stopped");
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
