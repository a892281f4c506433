//! Tabular record sets
//!
//! The table-like structure returned by the dataframe-shaped operations:
//! an ordered set of columns, rows of JSON values, and optional row
//! labels. Delimited serialization goes through the csv crate.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{PermIdError, Result};

/// An ordered collection of uniformly shaped records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    /// Row labels, present only for column-oriented shapes.
    labels: Option<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new(), labels: None }
    }

    /// Build a table from row-oriented records.
    ///
    /// Columns are the union of record keys in first-seen order; fields a
    /// record lacks are filled with `Value::Null`.
    pub fn from_records(records: &[Map<String, Value>]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns.iter().map(|c| record.get(c).cloned().unwrap_or(Value::Null)).collect()
            })
            .collect();

        Self { columns, rows, labels: None }
    }

    /// Build a table from column-oriented records (column name -> cells).
    ///
    /// Shorter columns are padded with `Value::Null` to the longest one.
    pub fn from_columns(columns: Vec<(String, Vec<Value>)>) -> Self {
        let height = columns.iter().map(|(_, cells)| cells.len()).max().unwrap_or(0);
        let names = columns.iter().map(|(name, _)| name.clone()).collect();

        let mut rows = vec![Vec::with_capacity(columns.len()); height];
        for (_, cells) in &columns {
            for (i, row) in rows.iter_mut().enumerate() {
                row.push(cells.get(i).cloned().unwrap_or(Value::Null));
            }
        }

        Self { columns: names, rows, labels: None }
    }

    /// Attach row labels. Extra labels are dropped, missing ones left out.
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        let mut labels = labels;
        labels.truncate(self.rows.len());
        self.labels = Some(labels);
        self
    }

    /// Append a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    /// Column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, in insertion order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Row labels, if this table carries them.
    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (row, column name), if present.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(index)
    }

    /// Serialize to delimited text: header row included, no row labels.
    pub fn to_delimited(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(&self.columns)
            .map_err(|err| PermIdError::Internal(format!("failed to write header: {err}")))?;
        for row in &self.rows {
            let record: Vec<String> = row.iter().map(cell_text).collect();
            writer
                .write_record(&record)
                .map_err(|err| PermIdError::Internal(format!("failed to write row: {err}")))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| PermIdError::Internal(format!("failed to flush records: {err}")))?;
        String::from_utf8(bytes)
            .map_err(|err| PermIdError::Internal(format!("records are not valid UTF-8: {err}")))
    }

    /// Parse delimited text (header row expected) into a table of strings.
    pub fn from_delimited(text: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let columns = reader
            .headers()
            .map_err(|err| PermIdError::Decode(format!("invalid delimited header: {err}")))?
            .iter()
            .map(str::to_owned)
            .collect();

        let mut table = Self::new(columns);
        for record in reader.records() {
            let record = record
                .map_err(|err| PermIdError::Decode(format!("invalid delimited row: {err}")))?;
            table.push_row(record.iter().map(|cell| Value::String(cell.to_owned())).collect());
        }
        Ok(table)
    }
}

/// Render a cell for delimited output. Strings go bare, everything else
/// as its JSON text.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
