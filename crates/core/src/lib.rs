// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! cw-core: facility identifier assignment and validation
//!
//! This crate provides:
//! - Asset types and their identifier templates
//! - Table access traits with an in-memory fake for tests
//! - The Calculate Facility Identifiers and Quality Control tools
//! - Summary accumulation and the fatal error boundary

pub mod asset;
pub mod attribute;
pub mod checks;
pub mod config;
pub mod error;
pub mod fids;
pub mod message;
pub mod scan;
pub mod summary;
pub mod table;
pub mod tools;

pub use asset::{AssetType, IdentifierTemplate, UnknownAssetType};
pub use config::{Config, ConfigError};
pub use error::{guard, FatalError, Severity, ToolError, ToolOutcome};
pub use message::{Level, Message, MessageLog, MessageSink, SinkError};
pub use summary::Summary;
pub use table::{EditSession, Filter, Record, TableError, TableInfo, TableStore, Value};
pub use tools::{calculate_fids, quality_control, FidRequest, QcChecks, QcRequest};

#[cfg(any(test, feature = "test-support"))]
pub use table::FakeTableStore;
