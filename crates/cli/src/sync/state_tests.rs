// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;

#[test]
fn initial_state_is_idle() {
    let state = SharedSyncState::new();
    assert_eq!(state.get(), SyncState::Idle);
    assert!(!state.is_draining());
    assert!(!*state.subscribe().borrow());
}

#[test]
fn guard_holds_draining_until_dropped() {
    let state = SharedSyncState::new();
    let rx = state.subscribe();

    let guard = state.try_begin();
    assert!(guard.is_some());
    assert!(state.is_draining());
    assert!(*rx.borrow());

    drop(guard);
    assert_eq!(state.get(), SyncState::Idle);
    assert!(!*rx.borrow());
}

#[test]
fn second_begin_is_refused_while_draining() {
    let state = SharedSyncState::new();
    let _guard = state.try_begin().unwrap();

    assert!(state.try_begin().is_none());
    assert!(state.is_draining());
}

#[test]
fn begin_succeeds_again_after_release() {
    let state = SharedSyncState::new();
    drop(state.try_begin().unwrap());
    assert!(state.try_begin().is_some());
}

#[test]
fn guard_released_on_panic() {
    let state = SharedSyncState::new();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = state.try_begin().unwrap();
        panic!("drain blew up");
    }));
    assert!(result.is_err());
    assert!(!state.is_draining());
}

#[test]
fn state_display() {
    assert_eq!(SyncState::Idle.to_string(), "idle");
    assert_eq!(SyncState::Draining.to_string(), "draining");
}
