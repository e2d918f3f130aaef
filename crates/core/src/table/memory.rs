// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory table contents shared by stores without a query engine

use super::{Filter, ObjectId, Record, TableError, Value, OBJECTID};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row, keyed by field name
pub type RowData = BTreeMap<String, Value>;

/// Field list plus rows in cursor order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub fields: Vec<String>,
    #[serde(default)]
    pub rows: Vec<RowData>,
}

impl TableData {
    /// Build from a field list and positional rows
    ///
    /// Each row is zipped with `fields`; `OBJECTID` must be among them.
    pub fn from_rows(fields: &[&str], rows: Vec<Vec<Value>>) -> Self {
        let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        let rows = rows
            .into_iter()
            .map(|values| fields.iter().cloned().zip(values).collect())
            .collect();
        Self { fields, rows }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    fn require_fields<'a>(
        &self,
        table: &str,
        fields: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), TableError> {
        for field in fields {
            if !self.has_field(field) {
                return Err(TableError::FieldNotFound {
                    table: table.to_string(),
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }

    fn object_id(table: &str, row: &RowData) -> Result<ObjectId, TableError> {
        match row.get(OBJECTID) {
            Some(Value::Int(id)) => Ok(*id),
            _ => Err(TableError::Backend(format!(
                "row without an integer {} in {}",
                OBJECTID, table
            ))),
        }
    }

    fn matching<'a>(
        &'a self,
        table: &str,
        filter: &Filter,
    ) -> Result<impl Iterator<Item = &'a RowData> + 'a, TableError> {
        self.require_fields(table, filter.fields())?;
        let filter = filter.clone();
        Ok(self
            .rows
            .iter()
            .filter(move |row| filter.matches(&|field: &str| row.get(field))))
    }

    /// Read cursor over rows matching `filter`
    pub fn search(
        &self,
        table: &str,
        fields: &[&str],
        filter: &Filter,
    ) -> Result<Vec<Record>, TableError> {
        self.require_fields(table, fields.iter().copied())?;
        self.matching(table, filter)?
            .map(|row| {
                let object_id = Self::object_id(table, row)?;
                let values = fields
                    .iter()
                    .map(|f| row.get(*f).cloned().unwrap_or_default())
                    .collect();
                Ok(Record::new(object_id, values))
            })
            .collect()
    }

    /// Object IDs of rows matching `filter`
    pub fn select(&self, table: &str, filter: &Filter) -> Result<Vec<ObjectId>, TableError> {
        self.matching(table, filter)?
            .map(|row| Self::object_id(table, row))
            .collect()
    }

    /// Check that an update could be applied, without applying it
    pub fn validate_update(
        &self,
        table: &str,
        object_id: ObjectId,
        values: &[(&str, Value)],
    ) -> Result<(), TableError> {
        self.require_fields(table, values.iter().map(|(f, _)| *f))?;
        if self.position(object_id).is_none() {
            return Err(TableError::RowNotFound {
                table: table.to_string(),
                object_id,
            });
        }
        Ok(())
    }

    /// Overwrite fields of one row
    pub fn update(
        &mut self,
        table: &str,
        object_id: ObjectId,
        values: &[(String, Value)],
    ) -> Result<(), TableError> {
        self.require_fields(table, values.iter().map(|(f, _)| f.as_str()))?;
        let idx = self
            .position(object_id)
            .ok_or_else(|| TableError::RowNotFound {
                table: table.to_string(),
                object_id,
            })?;
        let row = &mut self.rows[idx];
        for (field, value) in values {
            row.insert(field.clone(), value.clone());
        }
        Ok(())
    }

    fn position(&self, object_id: ObjectId) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.get(OBJECTID) == Some(&Value::Int(object_id)))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
