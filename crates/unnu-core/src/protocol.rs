//! Line protocol spoken by the benchmark binary and stored in result files.
//!
//! Every non-comment line is either a [`Record::Header`] naming the fields or
//! a [`Record::Values`] row aligned positionally with the most recent header.
//! A line is a value row iff every field parses as a number. Fields are comma
//! separated and surrounding whitespace is ignored; `#` starts a comment line.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::errors::{BenchError, ErrorInfo};

/// Field separator of result files.
pub const DELIMITER: u8 = b',';
/// First byte of a comment line.
pub const COMMENT: u8 = b'#';

/// One classified line of benchmark output.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// Field names, in output order.
    Header(Vec<String>),
    /// Finite numeric values aligned with the active header.
    Values(Vec<f64>),
}

impl Record {
    /// Classifies a trimmed CSV record. Only finite literals count as
    /// numbers, so fields named `nan` or `inf` still form a header.
    pub fn classify(fields: &StringRecord) -> Self {
        let values: Option<Vec<f64>> = fields
            .iter()
            .map(|field| field.parse::<f64>().ok().filter(|value| value.is_finite()))
            .collect();
        match values {
            Some(values) => Record::Values(values),
            None => Record::Header(fields.iter().map(str::to_owned).collect()),
        }
    }

    /// True for [`Record::Header`].
    pub fn is_header(&self) -> bool {
        matches!(self, Record::Header(_))
    }
}

/// A record together with the 1-based line it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRecord {
    /// 1-based line number in the source text.
    pub line: u64,
    /// Classified content of the line.
    pub record: Record,
}

/// Reads every record of `reader`, skipping comments and blank lines.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<LineRecord>, BenchError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(DELIMITER)
        .comment(Some(COMMENT))
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut records = Vec::new();
    for result in csv_reader.records() {
        let fields = result.map_err(wrap_csv)?;
        if fields.iter().all(str::is_empty) {
            continue;
        }
        let line = fields.position().map(|pos| pos.line()).unwrap_or_default();
        records.push(LineRecord {
            line,
            record: Record::classify(&fields),
        });
    }
    Ok(records)
}

/// Tracks the active header and checks that value rows stay aligned with it.
#[derive(Debug, Clone, Default)]
pub struct SchemaTracker {
    header: Option<Vec<String>>,
    rows: usize,
}

impl SchemaTracker {
    /// Tracker with no header seen yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Active header, once one has been seen.
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Number of value rows accepted so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Accepts one record, returning the values of a value row.
    ///
    /// A header identical to the active one is accepted and ignored so that
    /// concatenated result files of the same schema still load.
    pub fn push<'a>(&mut self, entry: &'a LineRecord) -> Result<Option<&'a [f64]>, BenchError> {
        match &entry.record {
            Record::Header(names) => {
                if let Some(active) = &self.header {
                    if active != names {
                        return Err(BenchError::Table(
                            ErrorInfo::new("header-mismatch", "header differs from the active header")
                                .with_context("line", entry.line.to_string())
                                .with_context("expected", active.join(","))
                                .with_context("found", names.join(","))
                                .with_hint("value rows must be numeric; a non-numeric field turns a row into a header"),
                        ));
                    }
                    return Ok(None);
                }
                self.header = Some(names.clone());
                Ok(None)
            }
            Record::Values(values) => {
                let Some(active) = &self.header else {
                    return Err(BenchError::Table(
                        ErrorInfo::new("values-before-header", "value row precedes any header")
                            .with_context("line", entry.line.to_string()),
                    ));
                };
                if values.len() != active.len() {
                    return Err(BenchError::Table(
                        ErrorInfo::new("width-mismatch", "value row width differs from header")
                            .with_context("line", entry.line.to_string())
                            .with_context("expected", active.len().to_string())
                            .with_context("found", values.len().to_string()),
                    ));
                }
                self.rows += 1;
                Ok(Some(values))
            }
        }
    }
}

/// Renders the comment line recording the sample count of a run.
pub fn sample_comment(sample_count: u32) -> String {
    format!("# Sampling = {sample_count}\n")
}

fn wrap_csv(err: csv::Error) -> BenchError {
    let mut info = ErrorInfo::new("csv-read", "failed to read delimited records");
    if let Some(pos) = err.position() {
        info = info.with_context("line", pos.line().to_string());
    }
    BenchError::Table(info.with_hint(err.to_string()))
}
