// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON document tables
//!
//! A workspace is a directory; each table is a `<name>.json` document in
//! it holding a field list and rows keyed by field name.

use cw_core::table::{
    EditSession, Filter, ObjectId, Record, TableData, TableError, TableInfo, TableStore, Value,
};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Held by the open edit session of a workspace
pub const LOCK_FILE: &str = ".edit.lock";

const EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid table document {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<StorageError> for TableError {
    fn from(err: StorageError) -> Self {
        TableError::Backend(err.to_string())
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write a table document to `tmp`
fn stage(tmp: &Path, data: &TableData) -> Result<(), StorageError> {
    let file = File::create(tmp).map_err(io_error(tmp))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data).map_err(|source| StorageError::Json {
        path: tmp.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_error(tmp))
}

/// Table store over JSON documents on disk
///
/// Table paths are relative to `root` unless absolute, with or without
/// the `.json` extension.
#[derive(Debug, Clone)]
pub struct JsonTableStore {
    root: PathBuf,
}

impl JsonTableStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file_for(&self, table: &str) -> PathBuf {
        let path = self.root.join(table);
        if path.extension().is_some_and(|e| e == EXTENSION) {
            path
        } else {
            let mut name = path.into_os_string();
            name.push(".");
            name.push(EXTENSION);
            PathBuf::from(name)
        }
    }

    fn load(&self, table: &str) -> Result<TableData, TableError> {
        let path = self.file_for(table);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(TableError::TableNotFound(table.to_string()))
            }
            Err(e) => return Err(io_error(&path)(e).into()),
        };
        serde_json::from_reader(BufReader::new(file))
            .map_err(|source| StorageError::Json { path, source }.into())
    }

    fn workspace_of(&self, table: &str) -> PathBuf {
        self.file_for(table)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }
}

impl Default for JsonTableStore {
    fn default() -> Self {
        Self::new(".")
    }
}

impl TableStore for JsonTableStore {
    fn describe(&self, table: &str) -> Result<TableInfo, TableError> {
        let data = self.load(table)?;
        let file = self.file_for(table);
        let name = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| table.to_string());
        Ok(TableInfo {
            name,
            workspace: self.workspace_of(table).to_string_lossy().into_owned(),
            fields: data.fields,
        })
    }

    fn search(
        &self,
        table: &str,
        fields: &[&str],
        filter: &Filter,
    ) -> Result<Vec<Record>, TableError> {
        tracing::debug!(table, %filter, "search");
        self.load(table)?.search(table, fields, filter)
    }

    fn start_editing(&self, workspace: &str) -> Result<Box<dyn EditSession + '_>, TableError> {
        let dir = PathBuf::from(workspace);
        let lock = dir.join(LOCK_FILE);
        match OpenOptions::new().write(true).create_new(true).open(&lock) {
            Ok(mut file) => {
                if let Err(e) = writeln!(file, "{}", std::process::id()) {
                    tracing::warn!(
                        lock = %lock.display(),
                        error = %e,
                        "failed to write edit lock owner"
                    );
                }
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(TableError::LockUnavailable(workspace.to_string()));
            }
            Err(e) => return Err(io_error(&lock)(e).into()),
        }
        tracing::debug!(workspace, "edit session started");

        Ok(Box::new(JsonEditSession {
            store: self,
            workspace: dir,
            lock,
            staged: BTreeMap::new(),
            finished: false,
        }))
    }
}

/// Buffered edits against one workspace
struct JsonEditSession<'a> {
    store: &'a JsonTableStore,
    workspace: PathBuf,
    lock: PathBuf,
    /// Edited copies keyed by table path
    staged: BTreeMap<String, TableData>,
    finished: bool,
}

impl JsonEditSession<'_> {
    fn check_workspace(&self, table: &str) -> Result<(), TableError> {
        if self.store.workspace_of(table) != self.workspace {
            return Err(TableError::NotEditable(table.to_string()));
        }
        Ok(())
    }

    fn staged_mut(&mut self, table: &str) -> Result<&mut TableData, TableError> {
        if !self.staged.contains_key(table) {
            let data = self.store.load(table)?;
            self.staged.insert(table.to_string(), data);
        }
        self.staged
            .get_mut(table)
            .ok_or_else(|| TableError::TableNotFound(table.to_string()))
    }

    fn write(&self, table: &str, data: &TableData) -> Result<(), StorageError> {
        let path = self.store.file_for(table);
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let result =
            stage(&tmp, data).and_then(|()| fs::rename(&tmp, &path).map_err(io_error(&path)));
        if result.is_err() {
            if let Err(e) = fs::remove_file(&tmp) {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(tmp = %tmp.display(), error = %e, "failed to remove staged table");
                }
            }
        }
        result
    }

    fn release(&mut self) {
        self.finished = true;
        if let Err(e) = fs::remove_file(&self.lock) {
            tracing::warn!(lock = %self.lock.display(), error = %e, "failed to remove edit lock");
        }
    }
}

impl EditSession for JsonEditSession<'_> {
    fn select_for_update(
        &mut self,
        table: &str,
        filter: &Filter,
    ) -> Result<Vec<ObjectId>, TableError> {
        self.check_workspace(table)?;
        self.staged_mut(table)?.select(table, filter)
    }

    fn update_row(
        &mut self,
        table: &str,
        object_id: ObjectId,
        values: &[(&str, Value)],
    ) -> Result<(), TableError> {
        self.check_workspace(table)?;
        let owned: Vec<(String, Value)> = values
            .iter()
            .map(|(f, v)| (f.to_string(), v.clone()))
            .collect();
        self.staged_mut(table)?.update(table, object_id, &owned)
    }

    fn commit(mut self: Box<Self>) -> Result<(), TableError> {
        let staged = std::mem::take(&mut self.staged);
        let result = staged
            .iter()
            .try_for_each(|(table, data)| self.write(table, data));
        self.release();
        tracing::info!(
            workspace = %self.workspace.display(),
            tables = staged.len(),
            ok = result.is_ok(),
            "edit session committed"
        );
        result.map_err(TableError::from)
    }
}

impl Drop for JsonEditSession<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        tracing::info!(
            workspace = %self.workspace.display(),
            discarded = self.staged.len(),
            "edit session aborted"
        );
        self.release();
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
