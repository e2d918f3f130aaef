// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Attribute table access
//!
//! The engine never owns rows. It reads them through a [`TableStore`] and
//! rewrites fields inside an [`EditSession`], which either commits every
//! pending write or none of them.

mod filter;
mod memory;

pub use filter::Filter;
pub use memory::{RowData, TableData};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTableStore, TableCall};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Row identifier field
pub const OBJECTID: &str = "OBJECTID";
/// Facility identifier field
pub const FACILITYID: &str = "FACILITYID";
/// Raw sequence value stored next to the facility identifier
pub const FACILITYIDINDEX: &str = "FACILITYIDINDEX";

/// Row identifier
pub type ObjectId = i64;

/// A nullable field value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Int(i64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// A row projected onto a requested field list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub object_id: ObjectId,
    /// Values in the order the fields were requested
    pub values: Vec<Value>,
}

impl Record {
    pub fn new(object_id: ObjectId, values: Vec<Value>) -> Self {
        Self { object_id, values }
    }

    /// Value at `idx`, or null when the projection is shorter
    pub fn value(&self, idx: usize) -> &Value {
        static NULL: Value = Value::Null;
        self.values.get(idx).unwrap_or(&NULL)
    }
}

/// Description of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    /// Base name, used in operator-facing messages
    pub name: String,
    /// Identifier of the workspace an edit scope must be opened on
    pub workspace: String,
    pub fields: Vec<String>,
}

impl TableInfo {
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }
}

/// Errors from table access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("table not found: {0}")]
    TableNotFound(String),
    #[error("field '{field}' not found in {table}")]
    FieldNotFound { table: String, field: String },
    #[error("cannot acquire a lock on {0}")]
    LockUnavailable(String),
    #[error("{0} cannot be updated outside an edit session")]
    NotEditable(String),
    #[error("row {object_id} not found in {table}")]
    RowNotFound { table: String, object_id: ObjectId },
    #[error("storage error: {0}")]
    Backend(String),
}

/// Read access to attribute tables plus the entry point for editing
pub trait TableStore {
    /// Describe a table
    fn describe(&self, table: &str) -> Result<TableInfo, TableError>;

    /// Read every row matching `filter`, projected onto `fields`, in cursor order
    fn search(
        &self,
        table: &str,
        fields: &[&str],
        filter: &Filter,
    ) -> Result<Vec<Record>, TableError>;

    /// Open an edit scope on a workspace
    ///
    /// Blocks or fails while another editor holds the workspace, depending
    /// on the store.
    fn start_editing(&self, workspace: &str) -> Result<Box<dyn EditSession + '_>, TableError>;
}

/// Transactional edit scope with an update cursor
///
/// Dropping a session without calling [`EditSession::commit`] discards every
/// pending write.
pub trait EditSession {
    /// Object IDs of rows matching `filter`, in cursor order
    fn select_for_update(&mut self, table: &str, filter: &Filter)
        -> Result<Vec<ObjectId>, TableError>;

    /// Stage new values for fields of one row
    fn update_row(
        &mut self,
        table: &str,
        object_id: ObjectId,
        values: &[(&str, Value)],
    ) -> Result<(), TableError>;

    /// Apply every staged write
    fn commit(self: Box<Self>) -> Result<(), TableError>;
}
