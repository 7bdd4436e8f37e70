// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Monotonic wall clock for task timestamps.
//!
//! Every local mutation stamps the task with `updatedAt`. Timestamps produced
//! by one [`MonotonicClock`] strictly increase, even if the system clock stalls
//! or goes backwards, so the most recent edit always carries the largest value.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, TimeZone, Utc};

/// Trait for getting the current wall clock time.
///
/// This allows injecting a mock clock for testing.
pub trait ClockSource: Send + Sync {
    /// Returns the current time in milliseconds since Unix epoch.
    fn now_ms(&self) -> i64;
}

/// System clock implementation using `std::time::SystemTime`.
#[derive(Debug, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// A clock that never hands out the same or an earlier millisecond twice.
pub struct MonotonicClock {
    source: Box<dyn ClockSource>,
    last_ms: Mutex<i64>,
}

impl MonotonicClock {
    /// Creates a monotonic clock backed by the system clock.
    pub fn new() -> Self {
        Self::with_source(Box::new(SystemClock))
    }

    /// Creates a monotonic clock with a custom clock source.
    pub fn with_source(source: Box<dyn ClockSource>) -> Self {
        MonotonicClock {
            source,
            last_ms: Mutex::new(i64::MIN),
        }
    }

    /// Returns the next timestamp.
    ///
    /// If the physical clock has not advanced past the last value handed out,
    /// the result is the last value plus one millisecond.
    pub fn now(&self) -> DateTime<Utc> {
        let physical = self.source.now_ms();
        let mut last = self.last_ms.lock().unwrap_or_else(|e| e.into_inner());

        let next = if physical > *last {
            physical
        } else {
            last.saturating_add(1)
        };
        *last = next;

        to_datetime(next)
    }

    /// Records a timestamp seen elsewhere (e.g. loaded from disk) so later
    /// calls to [`now`](Self::now) are strictly greater than it.
    pub fn observe(&self, seen: DateTime<Utc>) {
        let seen_ms = seen.timestamp_millis();
        let mut last = self.last_ms.lock().unwrap_or_else(|e| e.into_inner());
        if seen_ms > *last {
            *last = seen_ms;
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

fn to_datetime(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).single().unwrap_or_default()
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
