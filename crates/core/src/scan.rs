// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record drawing scan lookup

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

/// File extensions a scan can have, most frequent first
pub const SCAN_EXTENSIONS: [&str; 3] = [".tif", ".pdf", ".dwg"];

/// Default bound on remembered lookups
pub const DEFAULT_CAPACITY: usize = 4096;

/// Answers "does this scan exist" for names found in the `COMMENTS` field
///
/// The same names repeat across thousands of mains, so results are
/// remembered. Memory stays bounded: once `capacity` names are held the
/// oldest is forgotten.
#[derive(Debug)]
pub struct ScanIndex {
    dir: PathBuf,
    capacity: usize,
    known: HashMap<String, bool>,
    order: VecDeque<String>,
    fs_checks: usize,
}

impl ScanIndex {
    pub fn new(dir: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            dir: dir.into(),
            capacity,
            known: HashMap::new(),
            order: VecDeque::new(),
            fs_checks: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of lookups that reached the filesystem
    pub fn fs_checks(&self) -> usize {
        self.fs_checks
    }

    /// Number of remembered lookups
    pub fn cached(&self) -> usize {
        self.known.len()
    }

    /// Whether `name` looks like a scan and exists in the scan directory
    ///
    /// Names that cannot be scans are rejected without touching the
    /// filesystem.
    pub fn exists(&mut self, name: &str) -> bool {
        if !is_scan_name(name) {
            return false;
        }
        if let Some(found) = self.known.get(name) {
            return *found;
        }

        self.fs_checks += 1;
        let found = self.dir.join(name).is_file();
        self.remember(name, found);
        found
    }

    fn remember(&mut self, name: &str, found: bool) {
        if self.capacity == 0 {
            return;
        }
        while self.order.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.known.remove(&oldest);
                }
                None => break,
            }
        }
        self.order.push_back(name.to_string());
        self.known.insert(name.to_string(), found);
    }
}

/// Cheap syntactic check before any filesystem access
pub fn is_scan_name(name: &str) -> bool {
    !name.is_empty() && SCAN_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
