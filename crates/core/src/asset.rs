// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Asset types and their facility identifier templates

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of water network feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    Casing,
    ControlValve,
    Fitting,
    Hydrant,
    ServiceLine,
    Structure,
    SystemValve,
    WaterMain,
}

impl AssetType {
    /// Every asset type, in toolbox order
    pub const ALL: [AssetType; 8] = [
        AssetType::Casing,
        AssetType::ControlValve,
        AssetType::Fitting,
        AssetType::Hydrant,
        AssetType::ServiceLine,
        AssetType::Structure,
        AssetType::SystemValve,
        AssetType::WaterMain,
    ];

    /// Operator-facing name, e.g. "Control Valve"
    pub fn display_name(self) -> &'static str {
        match self {
            AssetType::Casing => "Casing",
            AssetType::ControlValve => "Control Valve",
            AssetType::Fitting => "Fitting",
            AssetType::Hydrant => "Hydrant",
            AssetType::ServiceLine => "Service Line",
            AssetType::Structure => "Structure",
            AssetType::SystemValve => "System Valve",
            AssetType::WaterMain => "Water Main",
        }
    }

    /// Facility identifier template for this asset type
    pub fn template(self) -> IdentifierTemplate {
        match self {
            AssetType::Casing => IdentifierTemplate::suffixed("CA"),
            AssetType::ControlValve => IdentifierTemplate::suffixed("CV"),
            AssetType::Fitting => IdentifierTemplate::suffixed("FT"),
            AssetType::Hydrant => IdentifierTemplate::suffixed("HYD"),
            AssetType::ServiceLine => IdentifierTemplate::suffixed("SERV"),
            AssetType::Structure => IdentifierTemplate::suffixed("STR"),
            AssetType::SystemValve => IdentifierTemplate::suffixed("SV"),
            AssetType::WaterMain => IdentifierTemplate::prefixed("000015-WATER-000"),
        }
    }

    /// Whether tables of this type carry `FACILITYIDINDEX` next to `FACILITYID`
    pub fn is_index_bearing(self) -> bool {
        matches!(
            self,
            AssetType::Casing
                | AssetType::ControlValve
                | AssetType::Fitting
                | AssetType::Hydrant
                | AssetType::WaterMain
        )
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Unrecognized asset type name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown asset type: {0}")]
pub struct UnknownAssetType(pub String);

impl FromStr for AssetType {
    type Err = UnknownAssetType;

    /// Accepts display names and snake/kebab/camel case spellings,
    /// ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        AssetType::ALL
            .into_iter()
            .find(|t| {
                t.display_name()
                    .chars()
                    .filter(|c| *c != ' ')
                    .flat_map(char::to_lowercase)
                    .eq(key.chars())
            })
            .ok_or_else(|| UnknownAssetType(s.to_string()))
    }
}

/// Format rule with a single insertion point for a counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierTemplate {
    pub prefix: &'static str,
    pub suffix: &'static str,
}

impl IdentifierTemplate {
    const fn suffixed(suffix: &'static str) -> Self {
        Self { prefix: "", suffix }
    }

    const fn prefixed(prefix: &'static str) -> Self {
        Self { prefix, suffix: "" }
    }

    /// Insert `n` without padding; zeros come only from a literal prefix
    pub fn render(&self, n: u64) -> String {
        format!("{}{}{}", self.prefix, n, self.suffix)
    }

    /// Full-string pattern accepting any rendering of this template
    pub fn pattern(&self) -> Result<Regex, regex::Error> {
        Regex::new(&format!(
            r"^{}\d+{}$",
            regex::escape(self.prefix),
            regex::escape(self.suffix)
        ))
    }
}

#[cfg(test)]
#[path = "asset_tests.rs"]
mod tests;
