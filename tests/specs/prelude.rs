//! Shared helpers for CLI specs

#![allow(dead_code)]

pub use assert_cmd::Command;
pub use serde_json::{json, Value};
pub use similar_asserts::assert_eq;

use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const OBJECTID: &str = "OBJECTID";
pub const FACILITYID: &str = "FACILITYID";
pub const FACILITYIDINDEX: &str = "FACILITYIDINDEX";

/// A scratch directory holding JSON tables and config
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Write `<rel>.json` with positional rows zipped onto `fields`
    pub fn table(&self, rel: &str, fields: &[&str], rows: Vec<Vec<Value>>) {
        let rows: Vec<Value> = rows
            .into_iter()
            .map(|row| {
                let object: serde_json::Map<String, Value> = fields
                    .iter()
                    .map(|f| f.to_string())
                    .zip(row)
                    .collect();
                Value::Object(object)
            })
            .collect();
        let doc = json!({ "fields": fields, "rows": rows });
        self.file(
            &format!("{}.json", rel),
            &serde_json::to_string_pretty(&doc).unwrap(),
        );
    }

    /// Hydrant-style table: OBJECTID, FACILITYID, FACILITYIDINDEX
    pub fn indexed_table(&self, rel: &str, fids: &[&str]) {
        let rows = fids
            .iter()
            .enumerate()
            .map(|(i, fid)| vec![json!(i + 1), json!(fid), Value::Null])
            .collect();
        self.table(rel, &[OBJECTID, FACILITYID, FACILITYIDINDEX], rows);
    }

    /// One field of every row of `<rel>.json`
    pub fn column(&self, rel: &str, field: &str) -> Vec<Value> {
        let text = fs::read_to_string(self.path().join(format!("{}.json", rel))).unwrap();
        let doc: Value = serde_json::from_str(&text).unwrap();
        doc["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row.get(field).cloned().unwrap_or(Value::Null))
            .collect()
    }

    /// The binary, run in the project with a sealed-off environment
    pub fn colawater(&self) -> Command {
        let mut cmd = Command::cargo_bin("colawater").unwrap();
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .env_remove("USERNAME")
            .env("USER", "tester")
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"));
        cmd
    }
}

pub fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
