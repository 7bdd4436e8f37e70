// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tqrs - An offline-first task list library.
//!
//! This crate provides the functionality behind the `taskq` CLI: a task list
//! that is always written locally first, with changes queued and replayed
//! against a remote task collection whenever it can be reached.
//!
//! # Main Components
//!
//! - [`sync::SyncEngine`] - Local mutations, the op queue drain and its runner
//! - [`sync::HttpRemote`] - HTTP/JSON client for the remote collection
//! - [`sync::Connectivity`] - Online/offline signal fed by a reachability prober
//! - [`Config`] - Remote URL, timeouts and probe timing
//! - [`Error`] - Error types for all operations
//!
//! # Embedding
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tq_core::FileStore;
//! use tqrs::sync::{Connectivity, HttpRemote, SyncEngine};
//!
//! let store = Arc::new(FileStore::open(data_dir)?);
//! let remote = Arc::new(HttpRemote::new(url, timeout)?);
//! let (engine, triggers) = SyncEngine::open(store, remote, Arc::new(Connectivity::new(true)))?;
//! tokio::spawn(engine.clone().run(triggers, shutdown));
//! engine.add_task("Buy milk", None).await?;
//! ```

mod cli;
mod commands;
mod display;
mod validate;

pub mod config;
pub mod error;
pub mod logging;
pub mod sync;

pub use cli::{Cli, Command, GlobalArgs, OutputFormat};
pub use config::Config;
pub use error::{Error, Result};

use commands::Context;

/// Execute a CLI invocation. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.global.verbose);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(execute(cli.global, cli.command))
}

async fn execute(global: GlobalArgs, command: Command) -> Result<()> {
    if let Command::Init { remote } = &command {
        return commands::init::run(&global, remote.as_deref());
    }

    let mut ctx = Context::open(&global)?;
    match command {
        Command::Init { .. } => Ok(()),
        Command::Add { title, description } => commands::task::add(&ctx, title, description).await,
        Command::Edit {
            id,
            title,
            description,
        } => commands::task::edit(&ctx, &id, title, description).await,
        Command::Done { id } => commands::task::done(&ctx, &id).await,
        Command::Reopen { id } => commands::task::reopen(&ctx, &id).await,
        Command::Toggle { id } => commands::task::toggle(&ctx, &id).await,
        Command::Rm { id } => commands::task::remove(&ctx, &id).await,
        Command::List { output } => commands::list::run(&ctx, output).await,
        Command::Queue { output } => commands::list::queue(&ctx, output).await,
        Command::Sync => commands::sync::run(&ctx).await,
        Command::Status => commands::sync::status(&ctx).await,
        Command::Watch => commands::sync::watch(&mut ctx).await,
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
