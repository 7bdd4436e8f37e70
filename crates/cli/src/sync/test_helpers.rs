// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;
use tq_core::{LocalStore, MemoryStore, ServerId};

use super::remote::{NewRemoteTask, Probe, RemoteClient, RemoteError, RemoteFuture, RemotePatch};

/// A call received by [`MockRemote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    Create { title: String, completed: bool },
    Update { id: u64, patch: RemotePatch },
    Delete { id: u64 },
}

/// A record held by [`MockRemote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRecord {
    pub title: String,
    pub completed: bool,
}

/// In-memory remote collection.
///
/// Assigns IDs starting at 501. Can be switched unavailable, told to fail a
/// specific call, or gated so calls block until permits are added.
pub struct MockRemote {
    next_id: AtomicU64,
    available: AtomicBool,
    fail_call: AtomicUsize,
    calls: Mutex<Vec<RemoteCall>>,
    records: Mutex<BTreeMap<u64, RemoteRecord>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(501),
            available: AtomicBool::new(true),
            fail_call: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
            records: Mutex::new(BTreeMap::new()),
            gate: None,
        }
    }

    /// A remote whose calls each wait for a permit from the returned semaphore.
    pub fn gated() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let remote = Self {
            gate: Some(Arc::clone(&gate)),
            ..Self::new()
        };
        (remote, gate)
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Make the `n`th call (1-based, counting from now on) fail.
    pub fn fail_nth_call(&self, n: usize) {
        let seen = self.calls.lock().unwrap().len();
        self.fail_call.store(seen + n, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn records(&self) -> BTreeMap<u64, RemoteRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Records the call and decides whether it fails.
    async fn enter(&self, call: RemoteCall) -> Result<(), RemoteError> {
        let number = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(call);
            calls.len()
        };
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        if !self.available.load(Ordering::SeqCst) {
            return Err(RemoteError::Unavailable("mock remote is down".into()));
        }
        if self.fail_call.load(Ordering::SeqCst) == number {
            return Err(RemoteError::Unavailable(format!("call {} failed", number)));
        }
        Ok(())
    }
}

impl RemoteClient for MockRemote {
    fn create(&self, task: NewRemoteTask) -> RemoteFuture<'_, ServerId> {
        Box::pin(async move {
            self.enter(RemoteCall::Create {
                title: task.title.clone(),
                completed: task.completed,
            })
            .await?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            self.records.lock().unwrap().insert(
                id,
                RemoteRecord {
                    title: task.title,
                    completed: task.completed,
                },
            );
            Ok(ServerId(id))
        })
    }

    fn update(&self, id: ServerId, patch: RemotePatch) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            self.enter(RemoteCall::Update {
                id: id.0,
                patch: patch.clone(),
            })
            .await?;
            let mut records = self.records.lock().unwrap();
            let record = records.entry(id.0).or_insert_with(|| RemoteRecord {
                title: String::new(),
                completed: false,
            });
            if let Some(title) = patch.title {
                record.title = title;
            }
            if let Some(completed) = patch.completed {
                record.completed = completed;
            }
            Ok(())
        })
    }

    fn delete(&self, id: ServerId) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            self.enter(RemoteCall::Delete { id: id.0 }).await?;
            self.records.lock().unwrap().remove(&id.0);
            Ok(())
        })
    }
}

impl Probe for MockRemote {
    fn probe(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        Box::pin(async move { self.available.load(Ordering::SeqCst) })
    }
}

/// A fresh in-memory store.
pub fn memory_store() -> Arc<dyn LocalStore> {
    Arc::new(MemoryStore::new())
}
