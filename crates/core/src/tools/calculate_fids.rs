// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Calculate Facility Identifiers

use crate::asset::AssetType;
use crate::error::{guard, ToolOutcome};
use crate::fids::{assign, Assignment};
use crate::message::MessageSink;
use crate::summary::Summary;
use crate::table::TableStore;

/// One table to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerInput {
    pub table: String,
    pub asset_type: AssetType,
    /// First counter value; `None` skips the table with a warning
    pub start: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FidRequest {
    pub placeholder: String,
    pub interval: u64,
    pub inputs: Vec<LayerInput>,
}

/// What happened to one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerOutcome {
    Skipped { reason: String },
    Unchanged,
    Assigned { rows: usize, next: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerReport {
    pub table: String,
    /// Base name used in messages
    pub name: String,
    pub outcome: LayerOutcome,
}

/// Assign identifiers to every input in turn
///
/// The summary lists the next start value per table. A fatal error stops
/// the batch; tables already finished stay committed and appear in the
/// dumped summary.
pub fn calculate_fids(
    store: &dyn TableStore,
    request: &FidRequest,
    sink: &mut dyn MessageSink,
) -> ToolOutcome<Vec<LayerReport>> {
    let span = tracing::info_span!(
        "tool.calculate_fids",
        placeholder = %request.placeholder,
        interval = request.interval
    );
    let _guard = span.enter();

    let mut summary = Summary::new();
    guard(&mut summary, sink, |summary, sink| {
        summary.add_result("TOOL", "New start values:");

        let mut reports = Vec::with_capacity(request.inputs.len());
        for input in &request.inputs {
            let info = store.describe(&input.table)?;
            let name = info.name.clone();

            let outcome = match input.start {
                None => {
                    let reason = format!("Start value omitted: skipping [{}]", name);
                    sink.warning(&reason)?;
                    LayerOutcome::Skipped { reason }
                }
                Some(start) => {
                    tracing::info!(table = %input.table, start, "calculating facility identifiers");
                    match assign(
                        store,
                        &input.table,
                        input.asset_type,
                        &request.placeholder,
                        request.interval,
                        start,
                    )? {
                        Assignment::Unchanged => {
                            sink.warning(&format!(
                                "No rows matched placeholder '{}': [{}]",
                                request.placeholder, name
                            ))?;
                            summary.add_item(&format!("{}: None used", name));
                            LayerOutcome::Unchanged
                        }
                        Assignment::Assigned { rows, next } => {
                            summary.add_item(&format!("{}: {}", name, next));
                            LayerOutcome::Assigned { rows, next }
                        }
                    }
                }
            };

            reports.push(LayerReport {
                table: input.table.clone(),
                name,
                outcome,
            });
        }

        summary.post(sink, false)?;
        Ok(reports)
    })
}

#[cfg(test)]
#[path = "calculate_fids_tests.rs"]
mod tests;
