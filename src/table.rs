//! Rectangular in-memory tables and conversion from per-target record
//! sequences. Row order is managed explicitly here; nothing downstream is
//! trusted to preserve insertion order.

use crate::records::Record;
use anyhow::{anyhow, Result};
use serde_json::Value;

/// A rectangular table: named columns, rows of JSON values. Every row has
/// exactly one cell per column (nulls are explicit).
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Stable sort of rows by one column with the given cell comparator;
    /// ties keep their current order.
    pub(crate) fn sort_stable_by_column(
        &mut self,
        col_idx: usize,
        cmp: impl Fn(&Value, &Value) -> std::cmp::Ordering,
    ) {
        self.rows.sort_by(|a, b| cmp(&a[col_idx], &b[col_idx]));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell lookup by row index and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(anyhow!(
                "row has {} cells, table has {} columns",
                row.len(),
                self.columns.len()
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Build a table from records with the record type's fixed column order.
    /// Fields absent from a record's serialized form become nulls so the
    /// table stays rectangular.
    pub fn from_records<R: Record>(records: &[R]) -> Result<Table> {
        let mut table = Table::new(R::COLUMNS.iter().map(|c| c.to_string()).collect());
        for rec in records {
            let v = serde_json::to_value(rec)?;
            let obj = v
                .as_object()
                .ok_or_else(|| anyhow!("record did not serialize to an object"))?;
            let row: Vec<Value> = R::COLUMNS
                .iter()
                .map(|c| obj.get(*c).cloned().unwrap_or(Value::Null))
                .collect();
            table.push_row(row)?;
        }
        Ok(table)
    }
}

/// Concatenate per-target record sequences into a single table, preserving
/// collection order within each target's contribution. The `subreddit_name`
/// column already discriminates targets in both record schemas.
pub fn to_table<R: Record>(per_target: &[(String, Vec<R>)]) -> Result<Table> {
    let mut out = Table::new(R::COLUMNS.iter().map(|c| c.to_string()).collect());
    for (_, records) in per_target {
        let t = Table::from_records(records)?;
        for row in t.rows {
            out.push_row(row)?;
        }
    }
    Ok(out)
}

/// One table per target, keyed by target name, in request order.
pub fn to_tables<R: Record>(per_target: &[(String, Vec<R>)]) -> Result<Vec<(String, Table)>> {
    per_target
        .iter()
        .map(|(name, records)| Ok((name.clone(), Table::from_records(records)?)))
        .collect()
}
