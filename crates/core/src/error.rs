// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool-boundary error handling
//!
//! Tool bodies return [`ToolError`]. [`guard`] is the one place those errors
//! are turned into operator output: the summary so far is posted marked as
//! dumped, followed by a single [`FatalError`] describing what went wrong
//! and how to fix it.

use crate::message::{MessageSink, SinkError};
use crate::summary::Summary;
use crate::table::TableError;
use std::fmt;
use thiserror::Error;

/// Known causes of environment failures and their fixes
pub const TROUBLESHOOTING: [&str; 4] = [
    "Field not found: you probably selected the wrong layer for this asset type",
    "Cannot acquire a lock: close the attribute tables of the layers this tool edits",
    "Cannot be updated outside an edit session: you probably selected a read-only source by mistake",
    "Table not found: check the layer path",
];

/// Failures a tool body can raise
#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("interval must be greater than zero, got {0}")]
    InvalidInterval(u64),
    #[error("facility identifier counter overflowed at {0}")]
    CounterOverflow(u64),
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("message delivery failed: {0}")]
    Sink(#[from] SinkError),
}

/// How bad a tool failure is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Precondition not met by the data or the environment; the operator can fix it
    Environment,
    /// Anything else
    Unexpected,
}

/// Classify a tool failure
pub fn classify(err: &ToolError) -> Severity {
    match err {
        ToolError::Table(
            TableError::TableNotFound(_)
            | TableError::FieldNotFound { .. }
            | TableError::LockUnavailable(_)
            | TableError::NotEditable(_),
        )
        | ToolError::InvalidInterval(_) => Severity::Environment,
        ToolError::Table(TableError::RowNotFound { .. } | TableError::Backend(_))
        | ToolError::CounterOverflow(_)
        | ToolError::Pattern(_)
        | ToolError::Sink(_) => Severity::Unexpected,
    }
}

/// Error with context and recovery suggestions for operator display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalError {
    pub severity: Severity,
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl FatalError {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

impl From<&ToolError> for FatalError {
    fn from(err: &ToolError) -> Self {
        let severity = classify(err);
        let fatal = FatalError::new(severity, err.to_string())
            .with_context("The tool stopped early; the summary above is incomplete");
        match severity {
            Severity::Environment => {
                let fatal = match err {
                    ToolError::InvalidInterval(_) => {
                        fatal.with_suggestion("Use an interval of 1 or more")
                    }
                    _ => fatal,
                };
                TROUBLESHOOTING
                    .iter()
                    .fold(fatal, |f, tip| f.with_suggestion(*tip))
            }
            Severity::Unexpected => fatal
                .with_context("An unexpected error occurred")
                .with_suggestion("Contact the maintainer of this tool with the summary and this message"),
        }
    }
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for FatalError {}

/// How a tool invocation ended
#[derive(Debug)]
pub enum ToolOutcome<T> {
    Completed(T),
    Fatal(FatalError),
}

impl<T> ToolOutcome<T> {
    pub fn is_fatal(&self) -> bool {
        matches!(self, ToolOutcome::Fatal(_))
    }

    pub fn into_result(self) -> Result<T, FatalError> {
        match self {
            ToolOutcome::Completed(value) => Ok(value),
            ToolOutcome::Fatal(err) => Err(err),
        }
    }
}

/// Run a tool body at the invocation boundary
///
/// On failure the summary is posted with the dumped marker and one error
/// message goes to the sink. Delivery problems during that are logged and
/// otherwise ignored so the original failure is what gets reported.
pub fn guard<T, F>(summary: &mut Summary, sink: &mut dyn MessageSink, body: F) -> ToolOutcome<T>
where
    F: FnOnce(&mut Summary, &mut dyn MessageSink) -> Result<T, ToolError>,
{
    let err = match body(&mut *summary, &mut *sink) {
        Ok(value) => return ToolOutcome::Completed(value),
        Err(err) => err,
    };

    let fatal = FatalError::from(&err);
    tracing::error!(error = %err, severity = ?fatal.severity, "tool failed");

    if let Err(e) = summary.post(sink, true) {
        tracing::error!(error = %e, "failed to post dumped summary");
    }
    if let Err(e) = sink.error(&fatal.to_string()) {
        tracing::error!(error = %e, "failed to report error");
    }

    ToolOutcome::Fatal(fatal)
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
