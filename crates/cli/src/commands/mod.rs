// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod init;
pub mod list;
pub mod sync;
pub mod task;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::path::PathBuf;
use std::sync::Arc;

use tq_core::{FileStore, LocalStore};

use crate::cli::GlobalArgs;
use crate::config::{resolve_data_dir, Config};
use crate::error::Result;
use crate::sync::{Connectivity, DrainOutcome, DrainTriggers, HttpRemote, Probe, RemoteClient, SyncEngine};

/// Everything a command needs: the engine over the data directory, the
/// loaded config, and a way to check the remote is reachable.
pub struct Context {
    pub engine: Arc<SyncEngine>,
    pub config: Config,
    pub data_dir: PathBuf,
    pub offline: bool,
    triggers: Option<DrainTriggers>,
    probe: Arc<dyn Probe>,
}

impl Context {
    /// Opens the data directory named by the global options.
    pub fn open(global: &GlobalArgs) -> Result<Self> {
        let data_dir = resolve_data_dir(global.data_dir.clone())?;
        let config = Config::load(&data_dir)?;
        let remote = Arc::new(HttpRemote::new(
            config.remote.url.clone(),
            config.remote.timeout(),
        )?);
        let store: Arc<dyn LocalStore> = Arc::new(FileStore::open(&data_dir)?);
        Self::with_remote(store, remote, config, data_dir, global.offline)
    }

    /// Builds a context over any store and remote.
    pub fn with_remote<R>(
        store: Arc<dyn LocalStore>,
        remote: Arc<R>,
        config: Config,
        data_dir: PathBuf,
        offline: bool,
    ) -> Result<Self>
    where
        R: RemoteClient + Probe + 'static,
    {
        let connectivity = Arc::new(Connectivity::new(false));
        let (engine, triggers) = SyncEngine::open(store, remote.clone(), connectivity)?;
        Ok(Context {
            engine,
            config,
            data_dir,
            offline,
            triggers: Some(triggers),
            probe: remote,
        })
    }

    /// Probes the remote once and publishes the result.
    ///
    /// Always false with `--offline`.
    pub async fn check_online(&self) -> bool {
        if self.offline {
            return false;
        }
        let online = self.probe.probe().await;
        self.engine.connectivity().set_online(online);
        online
    }

    /// Drains once if the remote is reachable.
    pub async fn sync_if_online(&self) -> Option<DrainOutcome> {
        if !self.check_online().await {
            tracing::info!("remote not reachable, changes stay queued");
            return None;
        }
        Some(self.engine.drain().await)
    }

    pub fn probe(&self) -> Arc<dyn Probe> {
        Arc::clone(&self.probe)
    }

    /// Hands out the drain trigger receiver. Only the first call gets it.
    pub fn take_triggers(&mut self) -> Option<DrainTriggers> {
        self.triggers.take()
    }
}
