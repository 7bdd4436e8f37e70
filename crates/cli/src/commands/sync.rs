// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tokio_util::sync::CancellationToken;

use super::Context;
use crate::error::{Error, Result};
use crate::sync::{DrainOutcome, ReachabilityProber, RemoteError};

pub async fn run(ctx: &Context) -> Result<()> {
    let applied = sync_impl(ctx).await?;
    if applied == 0 {
        println!("Nothing to sync");
    } else {
        println!("Synced {} operation(s)", applied);
    }
    Ok(())
}

/// Probes, then drains once. Returns the number of ops applied.
pub(crate) async fn sync_impl(ctx: &Context) -> Result<usize> {
    if ctx.offline {
        let queued = ctx.engine.pending_ops().await.len();
        return Err(Error::SyncHalted {
            applied: 0,
            remaining: queued,
            reason: "offline mode".to_string(),
        });
    }

    let Some(outcome) = ctx.sync_if_online().await else {
        return Err(Error::Remote(RemoteError::Unavailable(
            ctx.config.remote.url.clone(),
        )));
    };

    match outcome {
        DrainOutcome::Completed { applied } => Ok(applied),
        DrainOutcome::AlreadyDraining => Ok(0),
        DrainOutcome::Halted {
            applied,
            remaining,
            error,
        } => Err(Error::SyncHalted {
            applied,
            remaining,
            reason: error.to_string(),
        }),
    }
}

pub async fn status(ctx: &Context) -> Result<()> {
    let connectivity = if ctx.offline {
        "offline (forced)"
    } else if ctx.check_online().await {
        "online"
    } else {
        "offline"
    };
    let queued = ctx.engine.pending_ops().await.len();
    let unsynced = ctx.engine.tasks().await.iter().filter(|t| !t.synced).count();

    println!("Data dir: {}", ctx.data_dir.display());
    println!("Remote: {}", ctx.config.remote.url);
    println!("Connectivity: {}", connectivity);
    println!("Queued operations: {}", queued);
    println!("Unsynced tasks: {}", unsynced);
    Ok(())
}

/// Runs the sync runner and the reachability prober until Ctrl-C.
pub async fn watch(ctx: &mut Context) -> Result<()> {
    let Some(triggers) = ctx.take_triggers() else {
        return Err(Error::Config("sync runner already started".to_string()));
    };
    let shutdown = CancellationToken::new();

    let prober = if ctx.offline {
        None
    } else {
        let prober = ReachabilityProber::new(
            ctx.probe(),
            ctx.engine.connectivity().clone(),
            ctx.config.connectivity.probe_config(),
        );
        Some(prober.spawn(shutdown.clone()))
    };
    let runner = tokio::spawn(ctx.engine.clone().run(triggers, shutdown.clone()));

    println!(
        "Watching {} ({} queued, Ctrl-C to stop)",
        ctx.config.remote.url,
        ctx.engine.pending_ops().await.len()
    );

    tokio::signal::ctrl_c().await?;
    shutdown.cancel();

    if let Some(prober) = prober {
        if let Err(e) = prober.await {
            tracing::warn!(error = %e, "prober task failed");
        }
    }
    if let Err(e) = runner.await {
        tracing::warn!(error = %e, "sync runner task failed");
    }

    println!(
        "Stopped ({} queued)",
        ctx.engine.pending_ops().await.len()
    );
    Ok(())
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
