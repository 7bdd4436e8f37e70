// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tq_core::id::short_id;
use tq_core::{Op, Task};

/// Sync marker shown next to each task.
pub fn sync_marker(task: &Task) -> &'static str {
    if task.synced {
        "synced"
    } else {
        "pending"
    }
}

/// Format a task as a single line.
///
/// Output format: `{short_id} [{synced|pending}] {title}`
pub fn format_task_line(task: &Task) -> String {
    format!("{} [{}] {}", task.short_id(), sync_marker(task), task.title)
}

/// Header summarizing how many tasks still wait for the remote.
pub fn sync_summary(tasks: &[Task]) -> String {
    match tasks.iter().filter(|t| !t.synced).count() {
        0 => "All synced".to_string(),
        n => format!("{} pending", n),
    }
}

/// Format a queued operation with its 1-based position.
///
/// Output format: `{n}. {kind} {short_id} (server {id}|not created)`
pub fn format_op_line(position: usize, op: &Op) -> String {
    let server = match op.server_id() {
        Some(id) => format!("server {}", id),
        None => "not created".to_string(),
    };
    format!(
        "{}. {} {} ({})",
        position,
        op.kind(),
        short_id(op.local_id()),
        server
    )
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
