use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Serialize;
use unnu_core::{read_records, BenchError, ErrorInfo, SchemaTracker};

/// Result file loaded as named numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ResultTable {
    /// Reads a result file from disk.
    pub fn from_path(path: &Path) -> Result<Self, BenchError> {
        let file = File::open(path).map_err(|err| BenchError::io("result-open", path, err))?;
        Self::from_reader(BufReader::new(file)).map_err(|err| match err {
            BenchError::Table(info) => BenchError::Table(info.with_path(path)),
            other => other,
        })
    }

    /// Reads result records, requiring a header followed by aligned rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, BenchError> {
        let records = read_records(reader)?;
        let mut tracker = SchemaTracker::new();
        let mut rows = Vec::new();
        for entry in &records {
            if let Some(values) = tracker.push(entry)? {
                rows.push(values.to_vec());
            }
        }
        let Some(columns) = tracker.header() else {
            return Err(BenchError::Table(ErrorInfo::new(
                "empty-result",
                "result file contains no header",
            )));
        };
        if rows.is_empty() {
            return Err(BenchError::Table(
                ErrorInfo::new("no-rows", "result file contains no value rows")
                    .with_context("columns", columns.join(",")),
            ));
        }
        Ok(Self {
            columns: columns.to_vec(),
            rows,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of column `name` in row order.
    pub fn column(&self, name: &str) -> Result<Vec<f64>, BenchError> {
        let idx = self.columns.iter().position(|column| column == name).ok_or_else(|| {
            BenchError::Table(
                ErrorInfo::new("missing-column", format!("column `{name}` not found"))
                    .with_context("column", name)
                    .with_hint(format!("available columns: {}", self.columns.join(","))),
            )
        })?;
        Ok(self.rows.iter().map(|row| row[idx]).collect())
    }
}
