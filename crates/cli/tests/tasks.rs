// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod common;
use common::*;

#[test]
fn list_empty() {
    let temp = TempDir::new().unwrap();
    tq(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("All synced"))
        .stdout(predicate::str::contains("No tasks"));
}

#[test]
fn add_then_list_shows_pending() {
    let temp = TempDir::new().unwrap();

    tq(&temp)
        .arg("add")
        .arg("Buy milk")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Created "))
        .stdout(predicate::str::contains(": Buy milk"));

    tq(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 pending"))
        .stdout(predicate::str::contains("[pending] Buy milk"));
}

#[test]
fn add_blank_title_fails() {
    let temp = TempDir::new().unwrap();
    tq(&temp).arg("add").arg("   ").assert().failure();
}

#[test]
fn edit_done_and_reopen_by_prefix() {
    let temp = TempDir::new().unwrap();
    let id = add_task(&temp, "Buy milk");
    let prefix = &id[..4];

    tq(&temp)
        .args(["edit", prefix, "--title", "Buy oat milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));

    tq(&temp)
        .args(["done", prefix])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed"));

    tq(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed (1):"))
        .stdout(predicate::str::contains("Buy oat milk"));

    tq(&temp)
        .args(["reopen", prefix])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reopened"));

    tq(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending (1):"));
}

#[test]
fn edit_without_fields_fails() {
    let temp = TempDir::new().unwrap();
    let id = add_task(&temp, "Buy milk");

    tq(&temp)
        .args(["edit", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn unknown_id_fails() {
    let temp = TempDir::new().unwrap();
    tq(&temp)
        .args(["done", "zzzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("task not found"));
}

#[test]
fn rm_removes_task_and_queues_delete() {
    let temp = TempDir::new().unwrap();
    let id = add_task(&temp, "Temp");

    tq(&temp)
        .args(["rm", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    tq(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks"));

    tq(&temp)
        .arg("queue")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 queued:"))
        .stdout(predicate::str::contains("1. create"))
        .stdout(predicate::str::contains("2. delete"));
}

#[test]
fn queue_json_lists_ops_in_order() {
    let temp = TempDir::new().unwrap();
    add_task(&temp, "First");
    add_task(&temp, "Second");

    let output = tq(&temp).args(["queue", "-o", "json"]).output().unwrap();
    assert!(output.status.success());

    let ops: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ops = ops.as_array().unwrap();
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0]["type"], "create");
    assert_eq!(ops[0]["task"]["title"], "First");
    assert_eq!(ops[1]["task"]["title"], "Second");
}

#[test]
fn data_survives_between_invocations() {
    let temp = TempDir::new().unwrap();
    add_task(&temp, "Persisted");

    assert!(temp.path().join("TASKS_V1.json").is_file());
    assert!(temp.path().join("TASK_OPS_V1.json").is_file());

    tq(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Connectivity: offline (forced)"))
        .stdout(predicate::str::contains("Queued operations: 1"));
}

#[test]
fn init_reports_already_initialized() {
    let temp = TempDir::new().unwrap();
    tq(&temp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized taskq"));
    tq(&temp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));
}
