// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Quality Control

use crate::asset::AssetType;
use crate::attribute::CSV_PROCESSING_MSG;
use crate::checks::{
    find_duplicates, find_faulty_scans, find_malformed, find_unknown_datasources, DuplicateGroup,
    MainFinding, MalformedFid,
};
use crate::error::{guard, ToolError, ToolOutcome};
use crate::message::MessageSink;
use crate::scan::{ScanIndex, DEFAULT_CAPACITY};
use crate::summary::Summary;
use crate::table::{TableStore, Value};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

/// Which checks to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QcChecks {
    pub fid_format: bool,
    pub fid_duplicates: bool,
    pub wm_files: bool,
    pub wm_datasources: bool,
}

impl QcChecks {
    pub fn all() -> Self {
        Self {
            fid_format: true,
            fid_duplicates: true,
            wm_files: true,
            wm_datasources: true,
        }
    }

    pub fn any(&self) -> bool {
        self.any_fid() || self.any_water_main()
    }

    fn any_fid(&self) -> bool {
        self.fid_format || self.fid_duplicates
    }

    fn any_water_main(&self) -> bool {
        self.wm_files || self.wm_datasources
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QcRequest {
    pub checks: QcChecks,
    /// Table per asset type; missing entries are omitted layers
    pub layers: BTreeMap<AssetType, String>,
    /// Directory holding record drawing scans
    pub scan_dir: Option<PathBuf>,
    pub scan_cache_capacity: usize,
}

impl Default for QcRequest {
    fn default() -> Self {
        Self {
            checks: QcChecks::default(),
            layers: BTreeMap::new(),
            scan_dir: None,
            scan_cache_capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Findings of one check against one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFindings<T> {
    pub table: String,
    pub name: String,
    pub findings: Vec<T>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QcReport {
    /// Asset types without a table, in asset order
    pub omitted: Vec<AssetType>,
    pub malformed: Vec<TableFindings<MalformedFid>>,
    pub duplicates: Vec<TableFindings<DuplicateGroup>>,
    pub faulty_scans: Option<TableFindings<MainFinding>>,
    pub unknown_datasources: Option<TableFindings<MainFinding>>,
}

impl QcReport {
    /// Total number of findings across every check
    pub fn finding_count(&self) -> usize {
        self.malformed.iter().map(|t| t.findings.len()).sum::<usize>()
            + self.duplicates.iter().map(|t| t.findings.len()).sum::<usize>()
            + self.faulty_scans.as_ref().map_or(0, |t| t.findings.len())
            + self.unknown_datasources.as_ref().map_or(0, |t| t.findings.len())
    }
}

/// Run the selected checks and post one summary of the findings
///
/// Checks run in a fixed order: identifier format over every present
/// layer, identifier duplicates, then the two water main checks.
pub fn quality_control(
    store: &dyn TableStore,
    request: &QcRequest,
    sink: &mut dyn MessageSink,
) -> ToolOutcome<QcReport> {
    let span = tracing::info_span!(
        "tool.quality_control",
        checks = ?request.checks,
        layers = request.layers.len()
    );
    let _guard = span.enter();

    let mut summary = Summary::new();
    guard(&mut summary, sink, |summary, sink| {
        let mut report = QcReport::default();

        let present: Vec<(AssetType, &str)> = AssetType::ALL
            .iter()
            .filter_map(|asset| request.layers.get(asset).map(|t| (*asset, t.as_str())))
            .collect();

        if request.checks.any_fid() {
            for asset in AssetType::ALL {
                if !request.layers.contains_key(&asset) {
                    sink.warning(&format!("Layer omitted: {}", asset))?;
                    report.omitted.push(asset);
                }
            }
        }

        if request.checks.fid_format {
            for (asset, table) in &present {
                report
                    .malformed
                    .push(format_check(store, *asset, table, summary)?);
            }
        }

        if request.checks.fid_duplicates {
            for (_, table) in &present {
                report.duplicates.push(duplicate_check(store, table, summary)?);
            }
        }

        if request.checks.any_water_main() {
            match request.layers.get(&AssetType::WaterMain) {
                None => {
                    sink.warning("Layer omitted: Water Main, skipping water main checks.")?;
                }
                Some(table) => {
                    if request.checks.wm_files {
                        match &request.scan_dir {
                            Some(dir) => {
                                let mut scans =
                                    ScanIndex::new(dir.clone(), request.scan_cache_capacity);
                                report.faulty_scans =
                                    Some(scan_check(store, table, &mut scans, summary)?);
                            }
                            None => {
                                sink.warning(
                                    "Scan directory not set, skipping water main files check.",
                                )?;
                            }
                        }
                    }
                    if request.checks.wm_datasources {
                        report.unknown_datasources =
                            Some(datasource_check(store, table, summary)?);
                    }
                }
            }
        }

        tracing::info!(findings = report.finding_count(), "quality control finished");
        summary.post(sink, false)?;
        Ok(report)
    })
}

fn format_check(
    store: &dyn TableStore,
    asset: AssetType,
    table: &str,
    summary: &mut Summary,
) -> Result<TableFindings<MalformedFid>, ToolError> {
    let name = store.describe(table)?.name;
    let pattern = asset.template().pattern()?;
    let findings = find_malformed(store, table, &pattern)?;

    summary.add_header(
        &name,
        "Incorrectly formatted facility identifiers (object ID, facility identifier):",
    );
    summary.add_note(&name, CSV_PROCESSING_MSG);
    let rows: Vec<_> = findings.iter().map(MalformedFid::to_values).collect();
    summary.add_items(&rows, true);
    summary.add_result(
        &name,
        &format!("{} incorrectly formatted facility identifiers.", findings.len()),
    );

    Ok(TableFindings {
        table: table.to_string(),
        name,
        findings,
    })
}

fn duplicate_check(
    store: &dyn TableStore,
    table: &str,
    summary: &mut Summary,
) -> Result<TableFindings<DuplicateGroup>, ToolError> {
    let name = store.describe(table)?.name;
    let findings = find_duplicates(store, table)?;

    summary.add_header(
        &name,
        "Duplicate facility identifiers (facility identifier, object IDs):",
    );
    summary.add_note(&name, CSV_PROCESSING_MSG);
    let rows: Vec<_> = findings.iter().map(DuplicateGroup::to_values).collect();
    summary.add_items(&rows, true);
    summary.add_result(&name, &format!("{} duplicate groups.", findings.len()));

    Ok(TableFindings {
        table: table.to_string(),
        name,
        findings,
    })
}

fn scan_check(
    store: &dyn TableStore,
    table: &str,
    scans: &mut ScanIndex,
    summary: &mut Summary,
) -> Result<TableFindings<MainFinding>, ToolError> {
    let name = store.describe(table)?.name;
    let findings = find_faulty_scans(store, table, scans)?;
    let unique: HashSet<&Value> = findings.iter().map(|f| &f.value).collect();

    summary.add_header(&name, "Non-existent associated files (object ID, comments):");
    summary.add_note(&name, CSV_PROCESSING_MSG);
    let rows: Vec<_> = findings.iter().map(MainFinding::to_values).collect();
    summary.add_items(&rows, true);
    summary.add_result(
        &name,
        &format!(
            "{} non-existent files for integrated mains ({} unique).",
            findings.len(),
            unique.len()
        ),
    );

    Ok(TableFindings {
        table: table.to_string(),
        name,
        findings,
    })
}

fn datasource_check(
    store: &dyn TableStore,
    table: &str,
    summary: &mut Summary,
) -> Result<TableFindings<MainFinding>, ToolError> {
    let name = store.describe(table)?.name;
    let findings = find_unknown_datasources(store, table)?;

    summary.add_header(&name, "Missing or unknown data sources (object ID, data source):");
    summary.add_note(&name, CSV_PROCESSING_MSG);
    let rows: Vec<_> = findings.iter().map(MainFinding::to_values).collect();
    summary.add_items(&rows, true);
    summary.add_result(
        &name,
        &format!(
            "{} missing or unknown data sources for integrated mains.",
            findings.len()
        ),
    );

    Ok(TableFindings {
        table: table.to_string(),
        name,
        findings,
    })
}

#[cfg(test)]
#[path = "quality_control_tests.rs"]
mod tests;
