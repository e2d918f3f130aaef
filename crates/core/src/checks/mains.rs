// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Water main checks
//!
//! Both checks only look at integrated mains, whose record drawing has
//! been linked and verified.

use crate::scan::ScanIndex;
use crate::table::{Filter, ObjectId, TableError, TableStore, Value};

pub const INTEGRATIONSTATUS: &str = "INTEGRATIONSTATUS";
pub const COMMENTS: &str = "COMMENTS";
pub const DATASOURCE: &str = "DATASOURCE";

/// Selects integrated mains
pub const INTEGRATED: &str = "Y";

/// Data source code meaning "unknown"
pub const UNKNOWN_DATASOURCE: &str = "UNK";

/// A water main and the field value that failed the check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainFinding {
    pub object_id: ObjectId,
    pub value: Value,
}

impl MainFinding {
    pub fn to_values(&self) -> Vec<Value> {
        vec![Value::Int(self.object_id), self.value.clone()]
    }
}

fn integrated() -> Filter {
    Filter::equals(INTEGRATIONSTATUS, INTEGRATED)
}

/// Integrated mains whose `COMMENTS` does not name an existing scan
pub fn find_faulty_scans(
    store: &dyn TableStore,
    table: &str,
    scans: &mut ScanIndex,
) -> Result<Vec<MainFinding>, TableError> {
    let span = tracing::info_span!("checks.scans", table, dir = %scans.dir().display());
    let _guard = span.enter();

    let records = store.search(table, &[COMMENTS], &integrated())?;
    let checked = records.len();
    let findings: Vec<_> = records
        .into_iter()
        .filter(|record| match record.value(0) {
            Value::Null => true,
            value => !scans.exists(&value.to_string()),
        })
        .map(|record| MainFinding {
            object_id: record.object_id,
            value: record.value(0).clone(),
        })
        .collect();

    tracing::info!(
        checked,
        missing = findings.len(),
        fs_checks = scans.fs_checks(),
        "scan check finished"
    );
    Ok(findings)
}

/// Integrated mains whose `DATASOURCE` is unknown, empty or null
pub fn find_unknown_datasources(
    store: &dyn TableStore,
    table: &str,
) -> Result<Vec<MainFinding>, TableError> {
    let span = tracing::info_span!("checks.datasources", table);
    let _guard = span.enter();

    let filter = Filter::And(vec![
        integrated(),
        Filter::Or(vec![
            Filter::equals(DATASOURCE, UNKNOWN_DATASOURCE),
            Filter::equals(DATASOURCE, ""),
            Filter::is_null(DATASOURCE),
        ]),
    ]);
    tracing::debug!(%filter, "searching");

    let findings: Vec<_> = store
        .search(table, &[DATASOURCE], &filter)?
        .into_iter()
        .map(|record| MainFinding {
            object_id: record.object_id,
            value: record.value(0).clone(),
        })
        .collect();

    tracing::info!(found = findings.len(), "data source check finished");
    Ok(findings)
}

#[cfg(test)]
#[path = "mains_tests.rs"]
mod tests;
