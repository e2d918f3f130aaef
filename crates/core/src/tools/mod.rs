// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool entry points
//!
//! Each tool owns one [`Summary`](crate::summary::Summary) for the whole
//! invocation and runs its body under [`guard`](crate::error::guard).

mod calculate_fids;
mod quality_control;

pub use calculate_fids::{calculate_fids, FidRequest, LayerInput, LayerOutcome, LayerReport};
pub use quality_control::{quality_control, QcChecks, QcReport, QcRequest, TableFindings};
