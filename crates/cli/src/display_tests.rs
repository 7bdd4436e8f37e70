// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Utc;
use tq_core::ServerId;

fn task(title: &str, synced: bool) -> Task {
    let mut task = Task::new(
        "0123456789abcdef".to_string(),
        title.to_string(),
        None,
        Utc::now(),
    );
    task.synced = synced;
    task
}

#[test]
fn task_line_shows_short_id_marker_and_title() {
    assert_eq!(
        format_task_line(&task("Buy milk", false)),
        "01234567 [pending] Buy milk"
    );
    assert_eq!(
        format_task_line(&task("Buy milk", true)),
        "01234567 [synced] Buy milk"
    );
}

#[test]
fn summary_counts_unsynced() {
    assert_eq!(sync_summary(&[]), "All synced");
    assert_eq!(sync_summary(&[task("a", true)]), "All synced");
    assert_eq!(
        sync_summary(&[task("a", false), task("b", true), task("c", false)]),
        "2 pending"
    );
}

#[test]
fn op_lines() {
    let created = Op::create(task("a", false));
    assert_eq!(format_op_line(1, &created), "1. create 01234567 (not created)");

    let deleted = Op::delete("0123456789abcdef".into(), Some(ServerId(501)));
    assert_eq!(format_op_line(2, &deleted), "2. delete 01234567 (server 501)");
}
