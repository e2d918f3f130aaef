// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool summaries
//!
//! A [`Summary`] collects report lines over a whole tool invocation and is
//! posted once as a single message. Each invocation owns its summary, so
//! repeated runs in one process never share lines.

use crate::attribute;
use crate::message::{MessageSink, SinkError};
use crate::table::Value;

/// Subject of the marker line appended when a summary is dumped on error
pub const OUTPUT_DUMPED_MSG: &str = "OUTPUT DUMPED DUE TO ERROR";

/// Kind of summary line; the value is the line prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentType {
    Header,
    Item,
    Note,
    Result,
}

impl ContentType {
    fn prefix(self) -> &'static str {
        match self {
            ContentType::Header => "",
            ContentType::Item => "\t",
            ContentType::Note => "[NOTE] ",
            ContentType::Result => "[RESULT] ",
        }
    }
}

/// Ordered, append-only report text
#[derive(Debug, Default)]
pub struct Summary {
    lines: Vec<String>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines posted so far, joined with newlines
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn append(&mut self, content: String, kind: ContentType) {
        self.lines.push(format!("{}{}", kind.prefix(), content));
    }

    pub fn add_header(&mut self, subject: &str, text: &str) {
        self.append(subject_str(subject, text), ContentType::Header);
    }

    pub fn add_item(&mut self, text: &str) {
        self.append(text.to_string(), ContentType::Item);
    }

    /// One item per row, fields formatted and joined by `", "`
    pub fn add_items<R>(&mut self, rows: &[R], csv: bool)
    where
        R: AsRef<[Value]>,
    {
        let fmt: fn(&Value) -> String = if csv {
            attribute::format_csv
        } else {
            attribute::format
        };
        for row in rows {
            let line = row
                .as_ref()
                .iter()
                .map(fmt)
                .collect::<Vec<_>>()
                .join(", ");
            self.add_item(&line);
        }
    }

    pub fn add_note(&mut self, subject: &str, text: &str) {
        self.append(subject_str(subject, text), ContentType::Note);
    }

    pub fn add_result(&mut self, subject: &str, text: &str) {
        self.append(subject_str(subject, text), ContentType::Result);
    }

    /// Send everything as one message, then clear
    ///
    /// With `dumped`, a marker line is appended first. The summary is
    /// emptied even when delivery fails.
    pub fn post(&mut self, sink: &mut dyn MessageSink, dumped: bool) -> Result<(), SinkError> {
        if dumped {
            self.add_header(OUTPUT_DUMPED_MSG, "");
        }
        let text = self.text();
        self.lines.clear();
        tracing::debug!(len = text.len(), dumped, "posting summary");
        sink.message(&text)
    }
}

fn subject_str(subject: &str, text: &str) -> String {
    format!("[{}] {}", subject, text)
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
