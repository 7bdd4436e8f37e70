// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod common;
use common::*;

#[test]
fn sync_offline_fails_and_keeps_queue() {
    let temp = TempDir::new().unwrap();
    add_task(&temp, "Buy milk");

    tq(&temp)
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 still queued"));
}

#[test]
fn queued_create_is_sent_on_sync() {
    let mut server = mockito::Server::new();
    let probe = server.mock("HEAD", "/todos").with_status(200).create();
    let create = server
        .mock("POST", "/todos")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "title": "Buy milk",
            "completed": false
        })))
        .with_status(201)
        .with_body(r#"{"id": 501}"#)
        .create();

    let temp = TempDir::new().unwrap();
    init_with_remote(&temp, &format!("{}/todos", server.url()));
    add_task(&temp, "Buy milk");

    tq_online(&temp)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Synced 1 operation(s)"));

    probe.assert();
    create.assert();

    tq(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("All synced"))
        .stdout(predicate::str::contains("[synced] Buy milk"));
    tq(&temp)
        .arg("queue")
        .assert()
        .success()
        .stdout(predicate::str::contains("Queue empty"));
}

#[test]
fn failed_sync_keeps_ops_queued() {
    let mut server = mockito::Server::new();
    server.mock("HEAD", "/todos").with_status(200).create();
    server.mock("POST", "/todos").with_status(500).create();

    let temp = TempDir::new().unwrap();
    init_with_remote(&temp, &format!("{}/todos", server.url()));
    add_task(&temp, "Buy milk");

    tq_online(&temp)
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sync stopped after 0 operation(s), 1 still queued"));

    tq(&temp)
        .arg("queue")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 queued:"));
}

#[test]
fn online_mutation_syncs_immediately() {
    let mut server = mockito::Server::new();
    server.mock("HEAD", "/todos").with_status(200).create();
    server
        .mock("POST", "/todos")
        .with_status(201)
        .with_body(r#"{"id": 7}"#)
        .create();
    let delete = server.mock("DELETE", "/todos/7").with_status(200).create();

    let temp = TempDir::new().unwrap();
    init_with_remote(&temp, &format!("{}/todos", server.url()));

    let output = tq_online(&temp).args(["add", "Ephemeral"]).output().unwrap();
    assert!(output.status.success());
    let id = String::from_utf8_lossy(&output.stdout)
        .split_whitespace()
        .nth(1)
        .unwrap()
        .trim_end_matches(':')
        .to_string();

    tq_online(&temp).args(["rm", &id]).assert().success();
    delete.assert();

    tq(&temp)
        .arg("queue")
        .assert()
        .success()
        .stdout(predicate::str::contains("Queue empty"));
}
