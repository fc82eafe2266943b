//! History merge engine: reconcile a freshly collected table with a
//! previously persisted one, deduplicating on a key column.
//!
//! Strictness is deliberate: differing column sets fail with
//! `SchemaMismatch` instead of silently unioning schemas, which would risk
//! corrupting historical columns.

use crate::error::CollectError;
use crate::store::TableStore;
use crate::table::Table;
use ahash::AHashSet;
use anyhow::{anyhow, Result};
use serde_json::Value;
use std::cmp::Ordering;
use std::path::Path;

pub const DEFAULT_DEDUP_KEY: &str = "id";
pub const DEFAULT_SORT_FIELD: &str = "subreddit_name";

/// Combine `old` and `new` rows, drop duplicates on the `key` column keeping
/// the first occurrence in old-then-new order (a row already in history is
/// never overwritten by a fresh duplicate), then stable-sort by `sort`.
/// Idempotent: merging the same new batch twice equals merging it once.
pub fn merge_tables(old: &Table, new: &Table, key: &str, sort: &str) -> Result<Table> {
    check_same_columns(old, new)?;

    let key_idx = old
        .column_index(key)
        .ok_or_else(|| anyhow!("key column not present: {}", key))?;
    let sort_idx = old
        .column_index(sort)
        .ok_or_else(|| anyhow!("sort column not present: {}", sort))?;

    // New rows may carry the same column set in a different order; re-index
    // them into the old table's order before concatenating.
    let remap: Vec<usize> = old
        .columns()
        .iter()
        .map(|c| new.column_index(c).expect("checked by schema equality"))
        .collect();

    let mut seen: AHashSet<String> = AHashSet::with_capacity(old.len() + new.len());
    let mut combined = Table::new(old.columns().to_vec());

    for row in old.rows() {
        if seen.insert(cell_key(&row[key_idx])) {
            combined.push_row(row.clone())?;
        }
    }
    for row in new.rows() {
        let reordered: Vec<Value> = remap.iter().map(|&i| row[i].clone()).collect();
        if seen.insert(cell_key(&reordered[key_idx])) {
            combined.push_row(reordered)?;
        }
    }

    let dropped = old.len() + new.len() - combined.len();
    if dropped > 0 {
        tracing::info!("merge dropped {} duplicate row(s) on key '{}'", dropped, key);
    }

    combined.sort_stable_by_column(sort_idx, value_ord);
    Ok(combined)
}

/// Load the persisted table at `path`, merge `new` into it, and (when `save`
/// is set) atomically replace the file with the combined result. The
/// combined table is always returned so a caller can inspect before
/// committing. A failed merge never touches the destination.
pub fn update_stored<S: TableStore + ?Sized>(
    store: &S,
    path: &Path,
    new: &Table,
    key: &str,
    sort: &str,
    save: bool,
) -> Result<Table> {
    let old = store.load(path)?;
    let combined = merge_tables(&old, new, key, sort)?;
    if save {
        store.save(path, &combined)?;
    }
    Ok(combined)
}

/// `update_stored` with the historical defaults: dedup on `id`, sort by
/// `subreddit_name`.
pub fn update_data<S: TableStore + ?Sized>(
    store: &S,
    path: &Path,
    new: &Table,
    save: bool,
) -> Result<Table> {
    update_stored(store, path, new, DEFAULT_DEDUP_KEY, DEFAULT_SORT_FIELD, save)
}

fn check_same_columns(old: &Table, new: &Table) -> Result<()> {
    let missing: Vec<String> = old
        .columns()
        .iter()
        .filter(|c| new.column_index(c).is_none())
        .cloned()
        .collect();
    let extra: Vec<String> = new
        .columns()
        .iter()
        .filter(|c| old.column_index(c).is_none())
        .cloned()
        .collect();
    if missing.is_empty() && extra.is_empty() {
        Ok(())
    } else {
        Err(CollectError::SchemaMismatch { missing, extra }.into())
    }
}

/// Canonical key text for dedup. Strings compare by content, everything else
/// by its JSON rendering.
fn cell_key(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Total order over JSON cells: null < bool < number < string < array <
/// object; numbers compare as f64, strings lexicographically.
fn value_ord(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(f64::NAN), y.as_f64().unwrap_or(f64::NAN));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
