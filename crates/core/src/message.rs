// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator-facing message sinks

use thiserror::Error;

/// Errors from delivering a message
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// Destination for plain-text messages meant for a person
pub trait MessageSink {
    fn message(&mut self, text: &str) -> Result<(), SinkError>;

    fn warning(&mut self, text: &str) -> Result<(), SinkError>;

    fn error(&mut self, text: &str) -> Result<(), SinkError>;
}

/// A delivered message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

/// Sink that keeps every message in memory
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Texts of messages at one level, in delivery order
    pub fn texts(&self, level: Level) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.level == level)
            .map(|m| m.text.as_str())
            .collect()
    }

    fn push(&mut self, level: Level, text: &str) -> Result<(), SinkError> {
        self.messages.push(Message {
            level,
            text: text.to_string(),
        });
        Ok(())
    }
}

impl MessageSink for MessageLog {
    fn message(&mut self, text: &str) -> Result<(), SinkError> {
        self.push(Level::Info, text)
    }

    fn warning(&mut self, text: &str) -> Result<(), SinkError> {
        self.push(Level::Warning, text)
    }

    fn error(&mut self, text: &str) -> Result<(), SinkError> {
        self.push(Level::Error, text)
    }
}
