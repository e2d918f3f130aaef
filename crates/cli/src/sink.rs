// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal message sink

use cw_core::message::{MessageSink, SinkError};
use std::io::{self, Stderr, Stdout, Write};

/// Messages to one writer, warnings and errors to another
pub struct ConsoleSink<O, E> {
    out: O,
    err: E,
}

impl ConsoleSink<Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> ConsoleSink<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> MessageSink for ConsoleSink<O, E> {
    fn message(&mut self, text: &str) -> Result<(), SinkError> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }

    fn warning(&mut self, text: &str) -> Result<(), SinkError> {
        writeln!(self.err, "warning: {}", text)?;
        Ok(())
    }

    fn error(&mut self, text: &str) -> Result<(), SinkError> {
        // Fatal errors already render their own "error: " prefix
        write!(self.err, "{}", text)?;
        self.err.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
