// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Facility identifier sequence generation
//!
//! Rows awaiting an identifier carry a placeholder (usually the
//! technician's initials) in `FACILITYID`. [`assign`] replaces each of them
//! with the next identifier in sequence inside a single edit scope, so a
//! failure part way through leaves the table untouched.

use crate::asset::AssetType;
use crate::error::ToolError;
use crate::table::{Filter, TableError, TableStore, Value, FACILITYID, FACILITYIDINDEX};

/// Result of one sequence run over a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// No row held the placeholder
    Unchanged,
    /// `rows` identifiers were written; `next` is the first unused counter value
    Assigned { rows: usize, next: u64 },
}

impl Assignment {
    /// Counter to feed as `start` into the next run for the same asset type
    pub fn next(&self) -> Option<u64> {
        match self {
            Assignment::Unchanged => None,
            Assignment::Assigned { next, .. } => Some(*next),
        }
    }
}

/// Replace every `placeholder` facility identifier in `table` with the
/// next identifier in sequence
///
/// Counters run `start, start + interval, ...` in cursor order. For
/// index-bearing asset types the raw counter is also written to
/// `FACILITYIDINDEX`.
pub fn assign(
    store: &dyn TableStore,
    table: &str,
    asset_type: AssetType,
    placeholder: &str,
    interval: u64,
    start: u64,
) -> Result<Assignment, ToolError> {
    if interval == 0 {
        return Err(ToolError::InvalidInterval(interval));
    }

    let span = tracing::info_span!("fids.assign", table, asset = %asset_type, placeholder);
    let _guard = span.enter();

    let info = store.describe(table)?;
    let index_bearing = asset_type.is_index_bearing();
    let required: &[&str] = if index_bearing {
        &[FACILITYID, FACILITYIDINDEX]
    } else {
        &[FACILITYID]
    };
    for field in required {
        if !info.has_field(field) {
            return Err(TableError::FieldNotFound {
                table: info.name.clone(),
                field: field.to_string(),
            }
            .into());
        }
    }

    let template = asset_type.template();
    let mut edit = store.start_editing(&info.workspace)?;
    let object_ids = edit.select_for_update(table, &Filter::equals(FACILITYID, placeholder))?;
    tracing::debug!(matched = object_ids.len(), start, interval, "selected rows");

    let mut counter = start;
    for object_id in &object_ids {
        let mut values = vec![(FACILITYID, Value::Text(template.render(counter)))];
        if index_bearing {
            let raw = i64::try_from(counter).map_err(|_| ToolError::CounterOverflow(counter))?;
            values.push((FACILITYIDINDEX, Value::Int(raw)));
        }
        edit.update_row(table, *object_id, &values)?;
        counter = counter
            .checked_add(interval)
            .ok_or(ToolError::CounterOverflow(counter))?;
    }

    edit.commit()?;

    if object_ids.is_empty() {
        tracing::warn!("no rows matched placeholder");
        return Ok(Assignment::Unchanged);
    }

    tracing::info!(rows = object_ids.len(), next = counter, "identifiers assigned");
    Ok(Assignment::Assigned {
        rows: object_ids.len(),
        next: counter,
    })
}

#[cfg(test)]
#[path = "fids_tests.rs"]
mod tests;
