// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::task::add_impl;
use crate::commands::testing::TestContext;

#[tokio::test]
async fn sync_drains_queue() {
    let t = TestContext::new();
    add_impl(&t, "A", None).await.unwrap();
    add_impl(&t, "B", None).await.unwrap();

    assert_eq!(sync_impl(&t).await.unwrap(), 2);
    assert!(t.engine.pending_ops().await.is_empty());
    assert_eq!(sync_impl(&t).await.unwrap(), 0);
}

#[tokio::test]
async fn sync_offline_reports_queue() {
    let t = TestContext::offline();
    add_impl(&t, "A", None).await.unwrap();

    let err = sync_impl(&t).await.unwrap_err();
    assert!(matches!(err, Error::SyncHalted { remaining: 1, .. }));
    assert_eq!(t.remote.call_count(), 0);
}

#[tokio::test]
async fn sync_unreachable_is_remote_error() {
    let t = TestContext::new();
    add_impl(&t, "A", None).await.unwrap();
    t.remote.set_available(false);

    let err = sync_impl(&t).await.unwrap_err();
    assert!(matches!(err, Error::Remote(RemoteError::Unavailable(_))));
    assert_eq!(t.engine.pending_ops().await.len(), 1);
}

#[tokio::test]
async fn sync_failure_mid_queue_is_halted() {
    let t = TestContext::new();
    add_impl(&t, "A", None).await.unwrap();
    add_impl(&t, "B", None).await.unwrap();
    t.remote.fail_nth_call(2);

    let err = sync_impl(&t).await.unwrap_err();
    assert!(matches!(
        err,
        Error::SyncHalted {
            applied: 1,
            remaining: 1,
            ..
        }
    ));
}
