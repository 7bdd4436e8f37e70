// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Online/offline signal and the background reachability prober.

use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::remote::Probe;

/// Prober state values for the atomic state field.
pub const PROBE_OFFLINE: u8 = 0;
pub const PROBE_PROBING: u8 = 1;
pub const PROBE_ONLINE: u8 = 2;

/// Current connectivity, published to any number of subscribers.
pub struct Connectivity {
    tx: watch::Sender<bool>,
}

impl Connectivity {
    /// Create a signal with the given initial state.
    pub fn new(online: bool) -> Self {
        let (tx, _) = watch::channel(online);
        Self { tx }
    }

    /// Publish a state. Subscribers are only woken on an actual change.
    pub fn set_online(&self, online: bool) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == online {
                return false;
            }
            *current = online;
            true
        });
        if changed {
            tracing::info!(online, "connectivity changed");
        }
    }

    /// Returns the current state.
    pub fn is_online(&self) -> bool {
        *self.tx.borrow()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

/// Timing for the reachability prober.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Delay between probes while online.
    pub interval: Duration,
    /// First delay after a failed probe.
    pub initial_backoff: Duration,
    /// Upper bound for the delay between failed probes.
    pub max_backoff: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(60),
        }
    }
}

/// Prober status readable without locking.
pub struct ProbeStatus {
    state: AtomicU8,
    failures: AtomicU32,
}

impl ProbeStatus {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(PROBE_OFFLINE),
            failures: AtomicU32::new(0),
        }
    }

    pub fn get(&self) -> u8 {
        self.state.load(Ordering::Acquire)
    }

    fn set(&self, state: u8) {
        self.state.store(state, Ordering::Release);
    }

    /// Number of consecutive failed probes.
    pub fn failures(&self) -> u32 {
        self.failures.load(Ordering::Acquire)
    }

    /// Get a human-readable status string.
    pub fn status_string(&self) -> String {
        match self.get() {
            PROBE_OFFLINE => "offline".to_string(),
            PROBE_PROBING => {
                let attempt = self.failures().saturating_add(1);
                format!("probing (attempt {})", attempt)
            }
            PROBE_ONLINE => "online".to_string(),
            _ => "unknown".to_string(),
        }
    }
}

impl Default for ProbeStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Periodically probes the remote and feeds the result into [`Connectivity`].
pub struct ReachabilityProber {
    probe: Arc<dyn Probe>,
    connectivity: Arc<Connectivity>,
    config: ProbeConfig,
    status: Arc<ProbeStatus>,
}

impl ReachabilityProber {
    pub fn new(probe: Arc<dyn Probe>, connectivity: Arc<Connectivity>, config: ProbeConfig) -> Self {
        Self {
            probe,
            connectivity,
            config,
            status: Arc::new(ProbeStatus::new()),
        }
    }

    /// Shared status for reporting.
    pub fn status(&self) -> Arc<ProbeStatus> {
        Arc::clone(&self.status)
    }

    /// Probe once and publish the result.
    pub async fn probe_once(&self) -> bool {
        self.status.set(PROBE_PROBING);
        let online = self.probe.probe().await;
        if online {
            self.status.failures.store(0, Ordering::Release);
            self.status.set(PROBE_ONLINE);
        } else {
            self.status.failures.fetch_add(1, Ordering::AcqRel);
            self.status.set(PROBE_OFFLINE);
        }
        self.connectivity.set_online(online);
        online
    }

    /// Spawn the probe loop. It runs until `cancel` fires.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(cancel).await })
    }

    async fn run(self, cancel: CancellationToken) {
        let mut backoff = self.config.initial_backoff;

        loop {
            let online = tokio::select! {
                _ = cancel.cancelled() => break,
                online = self.probe_once() => online,
            };

            let delay = if online {
                backoff = self.config.initial_backoff;
                self.config.interval
            } else {
                let delay = backoff;
                backoff = std::cmp::min(backoff.saturating_mul(2), self.config.max_backoff);
                tracing::debug!(
                    failures = self.status.failures(),
                    delay_ms = delay.as_millis() as u64,
                    "remote unreachable, backing off"
                );
                delay
            };

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        self.status.set(PROBE_OFFLINE);
    }
}

#[cfg(test)]
#[path = "connectivity_tests.rs"]
mod tests;
