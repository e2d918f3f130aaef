// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Display formatting for nullable field values

use crate::table::Value;

/// Shown in place of a null value
pub const NULL_DISPLAY: &str = "<Null>";

/// Note added to reports whose items went through [`format_csv`]
pub const CSV_PROCESSING_MSG: &str = "Commas, leading and trailing whitespace, and quotation marks have been removed so this output can be consumed properly as a CSV.";

/// Human readable form of a field value
///
/// Only a real null becomes `<Null>`. An empty string stays empty: blank
/// user data and unset framework defaults must remain distinguishable.
pub fn format(value: &Value) -> String {
    match value {
        Value::Null => NULL_DISPLAY.to_string(),
        other => other.to_string(),
    }
}

/// [`format`], then trimmed with commas and double quotes removed so the
/// result can sit unescaped in a comma-separated line
pub fn format_csv(value: &Value) -> String {
    format(value)
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '"'))
        .collect()
}

#[cfg(test)]
#[path = "attribute_tests.rs"]
mod tests;
