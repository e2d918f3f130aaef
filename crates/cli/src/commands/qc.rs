// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Quality control

use anyhow::{bail, Result};
use clap::Args;
use cw_core::message::MessageSink;
use cw_core::table::TableStore;
use cw_core::tools::{quality_control, QcChecks, QcRequest};
use cw_core::{AssetType, Config};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Args)]
pub struct QcArgs {
    /// Check facility identifier formats
    #[arg(long)]
    pub format: bool,

    /// Check for duplicate facility identifiers
    #[arg(long)]
    pub duplicates: bool,

    /// Check that integrated water mains name an existing scan
    #[arg(long)]
    pub wm_files: bool,

    /// Check integrated water main data sources
    #[arg(long)]
    pub wm_datasources: bool,

    /// Run every check
    #[arg(long)]
    pub all: bool,

    /// ASSET=TABLE, overriding the configured table for that asset type
    #[arg(long = "layer", value_parser = parse_layer)]
    pub layers: Vec<(AssetType, String)>,

    /// Directory holding record drawing scans
    #[arg(long)]
    pub scan_dir: Option<PathBuf>,
}

pub(crate) fn parse_layer(s: &str) -> Result<(AssetType, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid ASSET=TABLE: no '=' found in '{}'", s))?;
    let asset = s[..pos].trim().parse().map_err(|e| format!("{}", e))?;
    let table = &s[pos + 1..];
    if table.is_empty() {
        return Err(format!("invalid ASSET=TABLE: empty table in '{}'", s));
    }
    Ok((asset, table.to_string()))
}

impl QcArgs {
    fn checks(&self) -> QcChecks {
        if self.all {
            return QcChecks::all();
        }
        QcChecks {
            fid_format: self.format,
            fid_duplicates: self.duplicates,
            wm_files: self.wm_files,
            wm_datasources: self.wm_datasources,
        }
    }
}

/// Returns whether the tool completed
pub fn handle(
    args: QcArgs,
    config: &Config,
    store: &dyn TableStore,
    sink: &mut dyn MessageSink,
) -> Result<bool> {
    let checks = args.checks();
    if !checks.any() {
        bail!("no checks selected: pass --format, --duplicates, --wm-files, --wm-datasources or --all");
    }

    let mut layers: BTreeMap<AssetType, String> = config
        .layers
        .iter()
        .map(|(asset, path)| (*asset, path.to_string_lossy().into_owned()))
        .collect();
    layers.extend(args.layers);

    let request = QcRequest {
        checks,
        layers,
        scan_dir: args.scan_dir.or_else(|| config.scan_dir.clone()),
        scan_cache_capacity: config.scan_cache_capacity(),
    };
    tracing::debug!(?request, "quality control");

    Ok(!quality_control(store, &request, sink).is_fatal())
}

#[cfg(test)]
#[path = "qc_tests.rs"]
mod tests;
