// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::{Error, Result};

// Input length limits
pub const MAX_TITLE_LENGTH: usize = 500;
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

/// Trim a title and check it is non-empty and within limits.
pub fn validate_and_trim_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(Error::FieldEmpty { field: "Title" });
    }
    let len = trimmed.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(Error::FieldTooLong {
            field: "Title",
            actual: len,
            max: MAX_TITLE_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}

/// Trim a description and check its length.
///
/// An empty result is allowed: it clears the description.
pub fn validate_and_trim_description(description: &str) -> Result<String> {
    let trimmed = description.trim();
    let len = trimmed.chars().count();
    if len > MAX_DESCRIPTION_LENGTH {
        return Err(Error::FieldTooLong {
            field: "Description",
            actual: len,
            max: MAX_DESCRIPTION_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
