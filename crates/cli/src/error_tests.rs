// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn core_not_found_maps_to_task_not_found() {
    let err: Error = tq_core::Error::TaskNotFound("abc".into()).into();
    assert!(matches!(err, Error::TaskNotFound(ref id) if id == "abc"));
    assert!(err.to_string().contains("taskq list"));
}

#[test]
fn core_ambiguous_id_keeps_matches() {
    let err: Error = tq_core::Error::AmbiguousId {
        prefix: "ab".into(),
        matches: vec!["abc".into(), "abd".into()],
    }
    .into();
    assert_eq!(
        err.to_string(),
        "ambiguous task ID 'ab' matches: abc, abd"
    );
}

#[test]
fn core_storage_errors_are_wrapped() {
    let err: Error = tq_core::Error::Storage("disk full".into()).into();
    assert!(matches!(err, Error::Store(_)));
    assert_eq!(err.to_string(), "store error: storage error: disk full");
}

#[test]
fn core_io_error_maps_to_io() {
    let io = std::io::Error::other("boom");
    let err: Error = tq_core::Error::Io(io).into();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn field_errors_format() {
    let err = Error::FieldTooLong {
        field: "Title",
        actual: 600,
        max: 500,
    };
    assert_eq!(err.to_string(), "Title too long (600 chars, max 500)");
    assert_eq!(
        Error::FieldEmpty { field: "Title" }.to_string(),
        "Title cannot be empty"
    );
}

#[test]
fn sync_halted_reports_counts() {
    let err = Error::SyncHalted {
        applied: 2,
        remaining: 3,
        reason: "remote unavailable".into(),
    };
    assert_eq!(
        err.to_string(),
        "sync stopped after 2 operation(s), 3 still queued: remote unavailable"
    );
}
