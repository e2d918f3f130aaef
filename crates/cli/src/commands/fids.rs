// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Calculate facility identifiers

use anyhow::{bail, Result};
use clap::Args;
use cw_core::message::MessageSink;
use cw_core::table::TableStore;
use cw_core::tools::{calculate_fids, FidRequest, LayerInput};
use cw_core::{AssetType, Config};

#[derive(Args)]
pub struct FidsArgs {
    /// Facility identifier marking rows to fill (default: from config or login name)
    #[arg(long)]
    pub placeholder: Option<String>,

    /// Step between consecutive identifiers (default: from config, else 2)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// TABLE,ASSET,START; START may be '-' to skip the table
    #[arg(long = "input", required = true, value_parser = parse_input)]
    pub inputs: Vec<LayerInput>,
}

pub(crate) fn parse_input(s: &str) -> Result<LayerInput, String> {
    let mut parts = s.rsplitn(3, ',');
    let (start, asset, table) = match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(asset), Some(table)) if !table.is_empty() => (start, asset, table),
        _ => return Err(format!("expected TABLE,ASSET,START, got '{}'", s)),
    };
    let asset_type: AssetType = asset.trim().parse().map_err(|e| format!("{}", e))?;
    let start = match start.trim() {
        "" | "-" => None,
        n => Some(
            n.parse::<u64>()
                .map_err(|e| format!("invalid start value '{}': {}", n, e))?,
        ),
    };
    Ok(LayerInput {
        table: table.to_string(),
        asset_type,
        start,
    })
}

/// Returns whether the tool completed
pub fn handle(
    args: FidsArgs,
    config: &Config,
    store: &dyn TableStore,
    sink: &mut dyn MessageSink,
) -> Result<bool> {
    let Some(placeholder) = args.placeholder.or_else(|| config.placeholder()) else {
        bail!("no placeholder: pass --placeholder or set `placeholder` in colawater.toml");
    };
    let request = FidRequest {
        placeholder,
        interval: args.interval.unwrap_or_else(|| config.interval()),
        inputs: args.inputs,
    };
    tracing::debug!(?request, "calculate facility identifiers");

    Ok(!calculate_fids(store, &request, sink).is_fatal())
}

#[cfg(test)]
#[path = "fids_tests.rs"]
mod tests;
