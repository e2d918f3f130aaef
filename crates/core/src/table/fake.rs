// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake table store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{
    EditSession, Filter, ObjectId, Record, TableData, TableError, TableInfo, TableStore, Value,
};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

/// Recorded table call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCall {
    Describe { table: String },
    Search { table: String, filter: String },
    StartEditing { workspace: String },
    SelectForUpdate { table: String, filter: String },
    UpdateRow { table: String, object_id: ObjectId },
    Commit { workspace: String },
    Abort { workspace: String },
}

#[derive(Debug, Clone)]
struct FakeTable {
    workspace: String,
    data: TableData,
}

#[derive(Default)]
struct FakeState {
    tables: BTreeMap<String, FakeTable>,
    calls: Vec<TableCall>,
    editing: HashSet<String>,
    fail_updates_after: Option<usize>,
    lock_unavailable: bool,
}

/// In-memory table store with call recording and failure injection
///
/// Table paths look like `workspace/name`; the part before the last `/`
/// is the workspace.
#[derive(Clone, Default)]
pub struct FakeTableStore {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a table built from positional rows
    pub fn with_table(self, path: &str, fields: &[&str], rows: Vec<Vec<Value>>) -> Self {
        self.insert(path, TableData::from_rows(fields, rows));
        self
    }

    /// Add or replace a table
    pub fn insert(&self, path: &str, data: TableData) {
        let workspace = split_path(path).0.to_string();
        self.state()
            .tables
            .insert(path.to_string(), FakeTable { workspace, data });
    }

    /// Make `update_row` fail with a lock error once a session has staged `n` updates
    pub fn fail_updates_after(&self, n: usize) {
        self.state().fail_updates_after = Some(n);
    }

    /// Make `start_editing` fail with a lock error
    pub fn fail_locking(&self) {
        self.state().lock_unavailable = true;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<TableCall> {
        self.state().calls.clone()
    }

    /// Committed values of one field, in row order
    pub fn column(&self, path: &str, field: &str) -> Vec<Value> {
        self.state()
            .tables
            .get(path)
            .map(|t| {
                t.data
                    .rows
                    .iter()
                    .map(|row| row.get(field).cloned().unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn record(&self, call: TableCall) {
        self.state().calls.push(call);
    }
}

fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

fn not_found(path: &str) -> TableError {
    TableError::TableNotFound(path.to_string())
}

impl TableStore for FakeTableStore {
    fn describe(&self, table: &str) -> Result<TableInfo, TableError> {
        self.record(TableCall::Describe {
            table: table.to_string(),
        });
        let state = self.state();
        let entry = state.tables.get(table).ok_or_else(|| not_found(table))?;
        Ok(TableInfo {
            name: split_path(table).1.to_string(),
            workspace: entry.workspace.clone(),
            fields: entry.data.fields.clone(),
        })
    }

    fn search(
        &self,
        table: &str,
        fields: &[&str],
        filter: &Filter,
    ) -> Result<Vec<Record>, TableError> {
        self.record(TableCall::Search {
            table: table.to_string(),
            filter: filter.to_string(),
        });
        let state = self.state();
        let entry = state.tables.get(table).ok_or_else(|| not_found(table))?;
        entry.data.search(table, fields, filter)
    }

    fn start_editing(&self, workspace: &str) -> Result<Box<dyn EditSession + '_>, TableError> {
        self.record(TableCall::StartEditing {
            workspace: workspace.to_string(),
        });
        let mut state = self.state();
        if state.lock_unavailable || !state.editing.insert(workspace.to_string()) {
            return Err(TableError::LockUnavailable(workspace.to_string()));
        }
        Ok(Box::new(FakeEditSession {
            store: self,
            workspace: workspace.to_string(),
            pending: Vec::new(),
            finished: false,
        }))
    }
}

struct FakeEditSession<'a> {
    store: &'a FakeTableStore,
    workspace: String,
    pending: Vec<(String, ObjectId, Vec<(String, Value)>)>,
    finished: bool,
}

impl FakeEditSession<'_> {
    fn check_workspace(&self, state: &FakeState, table: &str) -> Result<(), TableError> {
        let entry = state.tables.get(table).ok_or_else(|| not_found(table))?;
        if entry.workspace != self.workspace {
            return Err(TableError::NotEditable(table.to_string()));
        }
        Ok(())
    }
}

impl EditSession for FakeEditSession<'_> {
    fn select_for_update(
        &mut self,
        table: &str,
        filter: &Filter,
    ) -> Result<Vec<ObjectId>, TableError> {
        self.store.record(TableCall::SelectForUpdate {
            table: table.to_string(),
            filter: filter.to_string(),
        });
        let state = self.store.state();
        self.check_workspace(&state, table)?;
        state.tables[table].data.select(table, filter)
    }

    fn update_row(
        &mut self,
        table: &str,
        object_id: ObjectId,
        values: &[(&str, Value)],
    ) -> Result<(), TableError> {
        self.store.record(TableCall::UpdateRow {
            table: table.to_string(),
            object_id,
        });
        let state = self.store.state();
        if let Some(limit) = state.fail_updates_after {
            if self.pending.len() >= limit {
                return Err(TableError::LockUnavailable(table.to_string()));
            }
        }
        self.check_workspace(&state, table)?;
        state.tables[table]
            .data
            .validate_update(table, object_id, values)?;
        drop(state);

        self.pending.push((
            table.to_string(),
            object_id,
            values
                .iter()
                .map(|(f, v)| (f.to_string(), v.clone()))
                .collect(),
        ));
        Ok(())
    }

    fn commit(mut self: Box<Self>) -> Result<(), TableError> {
        let mut state = self.store.state();
        for (table, object_id, values) in std::mem::take(&mut self.pending) {
            let entry = state.tables.get_mut(&table).ok_or_else(|| not_found(&table))?;
            entry.data.update(&table, object_id, &values)?;
        }
        state.editing.remove(&self.workspace);
        state.calls.push(TableCall::Commit {
            workspace: self.workspace.clone(),
        });
        self.finished = true;
        Ok(())
    }
}

impl Drop for FakeEditSession<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut state = self.store.state();
        state.editing.remove(&self.workspace);
        state.calls.push(TableCall::Abort {
            workspace: self.workspace.clone(),
        });
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
