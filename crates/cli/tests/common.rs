// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// `taskq` bound to `dir` and kept off the network.
pub fn tq(dir: &TempDir) -> Command {
    let mut cmd = tq_online(dir);
    cmd.arg("--offline");
    cmd
}

/// `taskq` bound to `dir`, allowed to reach the configured remote.
pub fn tq_online(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("taskq");
    cmd.env_remove("TASKQ_LOG")
        .env("TASKQ_DATA_DIR", dir.path());
    cmd
}

/// Point the data directory at `url`.
pub fn init_with_remote(dir: &TempDir, url: &str) {
    tq(dir)
        .arg("init")
        .arg("--remote")
        .arg(url)
        .assert()
        .success();
}

/// Create a task offline and return its short ID.
pub fn add_task(dir: &TempDir, title: &str) -> String {
    let output = tq(dir).arg("add").arg(title).output().unwrap();
    assert!(output.status.success());

    // "Created <id>: <title>"
    String::from_utf8_lossy(&output.stdout)
        .split_whitespace()
        .nth(1)
        .unwrap()
        .trim_end_matches(':')
        .to_string()
}
