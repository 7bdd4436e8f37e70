// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use tq_core::FileStore;

use crate::cli::GlobalArgs;
use crate::config::{init_data_dir, resolve_data_dir};
use crate::error::Result;

pub fn run(global: &GlobalArgs, remote: Option<&str>) -> Result<()> {
    let data_dir = resolve_data_dir(global.data_dir.clone())?;
    if run_impl(&data_dir, remote)? {
        println!("Initialized taskq in {}", data_dir.display());
    } else {
        println!("Already initialized at {}", data_dir.display());
    }
    Ok(())
}

/// Returns true if a config file was written.
pub(crate) fn run_impl(data_dir: &Path, remote: Option<&str>) -> Result<bool> {
    let written = init_data_dir(data_dir, remote)?;
    FileStore::open(data_dir)?;
    Ok(written)
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
