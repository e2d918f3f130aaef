// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Facility identifier checks

use crate::attribute;
use crate::error::ToolError;
use crate::table::{Filter, ObjectId, TableError, TableStore, Value, FACILITYID};
use regex::Regex;
use std::collections::HashMap;

/// A row whose facility identifier does not fit its asset type's format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedFid {
    pub object_id: ObjectId,
    /// Identifier as displayed, `<Null>` for null
    pub facility_id: String,
}

impl MalformedFid {
    pub fn to_values(&self) -> Vec<Value> {
        vec![Value::Int(self.object_id), Value::from(self.facility_id.as_str())]
    }
}

/// Rows sharing one facility identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// The shared identifier as displayed
    pub facility_id: String,
    /// Members in cursor order, always two or more
    pub object_ids: Vec<ObjectId>,
}

impl DuplicateGroup {
    /// Identifier followed by every member, ready for a summary item
    pub fn to_values(&self) -> Vec<Value> {
        std::iter::once(Value::from(self.facility_id.as_str()))
            .chain(self.object_ids.iter().map(|id| Value::Int(*id)))
            .collect()
    }
}

/// Every row whose formatted facility identifier is not a full match of
/// `pattern`, in cursor order
///
/// A match must cover the whole value; a pattern matching only part of
/// it still produces a finding.
pub fn find_malformed(
    store: &dyn TableStore,
    table: &str,
    pattern: &Regex,
) -> Result<Vec<MalformedFid>, ToolError> {
    let span = tracing::info_span!("checks.malformed", table, pattern = pattern.as_str());
    let _guard = span.enter();

    let full = Regex::new(&format!("^(?:{})$", pattern.as_str()))?;
    let records = store.search(table, &[FACILITYID], &Filter::All)?;
    let findings: Vec<_> = records
        .into_iter()
        .filter_map(|record| {
            let facility_id = attribute::format(record.value(0));
            (!full.is_match(&facility_id)).then_some(MalformedFid {
                object_id: record.object_id,
                facility_id,
            })
        })
        .collect();

    tracing::info!(found = findings.len(), "format check finished");
    Ok(findings)
}

/// Groups of two or more rows with identical facility identifiers
///
/// Groups come out in order of first appearance; identifiers compare by
/// their displayed text and nulls group together.
pub fn find_duplicates(
    store: &dyn TableStore,
    table: &str,
) -> Result<Vec<DuplicateGroup>, TableError> {
    let span = tracing::info_span!("checks.duplicates", table);
    let _guard = span.enter();

    let records = store.search(table, &[FACILITYID], &Filter::All)?;

    // Keyed on the displayed text so 12 and "12" collide; nulls stay apart from "<Null>"
    let mut index: HashMap<Option<String>, usize> = HashMap::new();
    let mut groups: Vec<(Option<String>, Vec<ObjectId>)> = Vec::new();
    for record in records {
        let key = match record.value(0) {
            Value::Null => None,
            value => Some(value.to_string()),
        };
        match index.get(&key) {
            Some(&idx) => groups[idx].1.push(record.object_id),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![record.object_id]));
            }
        }
    }

    let duplicates: Vec<_> = groups
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(key, object_ids)| DuplicateGroup {
            facility_id: key.unwrap_or_else(|| attribute::format(&Value::Null)),
            object_ids,
        })
        .collect();

    tracing::info!(groups = duplicates.len(), "duplicate check finished");
    Ok(duplicates)
}

#[cfg(test)]
#[path = "fids_tests.rs"]
mod tests;
