// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Quality control checks over attribute tables

mod fids;
mod mains;

pub use fids::{find_duplicates, find_malformed, DuplicateGroup, MalformedFid};
pub use mains::{
    find_faulty_scans, find_unknown_datasources, MainFinding, COMMENTS, DATASOURCE, INTEGRATED,
    INTEGRATIONSTATUS, UNKNOWN_DATASOURCE,
};
