// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    plain = { "Buy milk", "Buy milk" },
    padded = { "  Buy milk \n", "Buy milk" },
    unicode = { "Café ☕", "Café ☕" },
)]
fn title_is_trimmed(input: &str, expected: &str) {
    assert_eq!(validate_and_trim_title(input).unwrap(), expected);
}

#[parameterized(
    empty = { "" },
    spaces = { "   " },
    newlines = { "\n\t\n" },
)]
fn blank_title_rejected(input: &str) {
    assert!(matches!(
        validate_and_trim_title(input),
        Err(Error::FieldEmpty { field: "Title" })
    ));
}

#[test]
fn title_length_limit_counts_chars() {
    let at_limit = "é".repeat(MAX_TITLE_LENGTH);
    assert!(validate_and_trim_title(&at_limit).is_ok());

    let over = "a".repeat(MAX_TITLE_LENGTH + 1);
    assert!(matches!(
        validate_and_trim_title(&over),
        Err(Error::FieldTooLong { actual, .. }) if actual == MAX_TITLE_LENGTH + 1
    ));
}

#[test]
fn empty_description_is_allowed() {
    assert_eq!(validate_and_trim_description("   ").unwrap(), "");
}

#[test]
fn description_too_long_rejected() {
    let over = "x".repeat(MAX_DESCRIPTION_LENGTH + 1);
    assert!(validate_and_trim_description(&over).is_err());
}
