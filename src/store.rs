//! Persistent tabular storage contract and the bundled NDJSON backend.
//! The merge engine only consumes `TableStore`; any rectangular format
//! (CSV, columnar, embedded DB) is an equally valid implementation.

use crate::table::Table;
use crate::util::{create_with_backoff, open_with_backoff, replace_file_atomic};
use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub trait TableStore {
    fn load(&self, path: &Path) -> Result<Table>;
    fn save(&self, path: &Path, table: &Table) -> Result<()>;
}

/// NDJSON table store: one JSON object per row, every column present on
/// every row (nulls explicit). Saves go through a temp file promoted
/// atomically, so a failed write never leaves a torn destination.
pub struct NdjsonStore {
    read_buf_bytes: usize,
    write_buf_bytes: usize,
}

impl Default for NdjsonStore {
    fn default() -> Self {
        Self {
            read_buf_bytes: 256 * 1024,
            write_buf_bytes: 256 * 1024,
        }
    }
}

impl NdjsonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self {
        self.read_buf_bytes = read_bytes.max(8 * 1024);
        self.write_buf_bytes = write_bytes.max(8 * 1024);
        self
    }
}

impl TableStore for NdjsonStore {
    fn load(&self, path: &Path) -> Result<Table> {
        let f = open_with_backoff(path).with_context(|| format!("open {}", path.display()))?;
        let rdr = BufReader::with_capacity(self.read_buf_bytes, f);

        let mut columns: Option<Vec<String>> = None;
        let mut table: Option<Table> = None;

        for (lineno, line) in rdr.lines().enumerate() {
            let line = line.with_context(|| format!("read {}", path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            let obj: Map<String, Value> = serde_json::from_str(&line)
                .with_context(|| format!("{}:{}: bad row", path.display(), lineno + 1))?;

            let cols = columns.get_or_insert_with(|| obj.keys().cloned().collect());
            if obj.len() != cols.len() || !cols.iter().all(|c| obj.contains_key(c)) {
                return Err(anyhow!(
                    "{}:{}: row columns differ from first row",
                    path.display(),
                    lineno + 1
                ));
            }

            let t = table.get_or_insert_with(|| Table::new(cols.clone()));
            let row: Vec<Value> = cols.iter().map(|c| obj[c].clone()).collect();
            t.push_row(row)?;
        }

        table.ok_or_else(|| anyhow!("{}: empty table file", path.display()))
    }

    fn save(&self, path: &Path, table: &Table) -> Result<()> {
        let tmp = path.with_extension("ndjson.inprogress");
        {
            let f = create_with_backoff(&tmp).with_context(|| format!("create {}", tmp.display()))?;
            let mut w = BufWriter::with_capacity(self.write_buf_bytes, f);
            for row in table.rows() {
                let mut obj = Map::with_capacity(table.columns().len());
                for (col, cell) in table.columns().iter().zip(row) {
                    obj.insert(col.clone(), cell.clone());
                }
                serde_json::to_writer(&mut w, &Value::Object(obj))?;
                w.write_all(b"\n")?;
            }
            w.flush().with_context(|| format!("flush {}", tmp.display()))?;
        }
        replace_file_atomic(&tmp, path)
    }
}
