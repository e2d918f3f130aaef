// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Row predicates

use super::Value;
use std::fmt;

/// Predicate over the fields of a row
///
/// Comparison follows SQL: a null field never equals anything, use
/// [`Filter::IsNull`] to select nulls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Eq(String, Value),
    IsNull(String),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Filter::IsNull(field.into())
    }

    /// Every field this predicate reads
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Filter::All => {}
            Filter::Eq(field, _) | Filter::IsNull(field) => {
                if !out.contains(&field.as_str()) {
                    out.push(field);
                }
            }
            Filter::And(parts) | Filter::Or(parts) => {
                for part in parts {
                    part.collect_fields(out);
                }
            }
        }
    }

    /// Evaluate against a row; `lookup` returns `None` for absent fields,
    /// which compare as null
    pub fn matches<'v, F>(&self, lookup: &F) -> bool
    where
        F: Fn(&str) -> Option<&'v Value>,
    {
        match self {
            Filter::All => true,
            Filter::Eq(field, expected) => match lookup(field) {
                None | Some(Value::Null) => false,
                Some(actual) => !expected.is_null() && actual == expected,
            },
            Filter::IsNull(field) => lookup(field).map_or(true, Value::is_null),
            Filter::And(parts) => parts.iter().all(|p| p.matches(lookup)),
            Filter::Or(parts) => parts.iter().any(|p| p.matches(lookup)),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("1 = 1"),
            Filter::Eq(field, Value::Int(n)) => write!(f, "{} = {}", field, n),
            Filter::Eq(field, Value::Null) => write!(f, "{} = NULL", field),
            Filter::Eq(field, Value::Text(s)) => {
                write!(f, "{} = '{}'", field, s.replace('\'', "''"))
            }
            Filter::IsNull(field) => write!(f, "{} IS NULL", field),
            Filter::And(parts) => join(f, parts, " AND "),
            Filter::Or(parts) => join(f, parts, " OR "),
        }
    }
}

fn join(f: &mut fmt::Formatter<'_>, parts: &[Filter], sep: &str) -> fmt::Result {
    f.write_str("(")?;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", part)?;
    }
    f.write_str(")")
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
