use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use unnu_core::{BenchError, ErrorInfo};

/// `strftime` pattern of result file stems.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y_%H:%M:%S";
/// Extension of result files.
pub const RESULT_EXTENSION: &str = "result";

const MAX_NAME_ATTEMPTS: usize = 3;

/// File name of a result file for a run started at `started_at`.
pub fn result_file_name(started_at: &NaiveDateTime) -> String {
    format!("{}.{}", started_at.format(TIMESTAMP_FORMAT), RESULT_EXTENSION)
}

/// Parses the run start time back out of a result file name.
pub fn parse_result_file_name(name: &str) -> Option<NaiveDateTime> {
    let stem = name.strip_suffix(RESULT_EXTENSION)?.strip_suffix('.')?;
    NaiveDateTime::parse_from_str(stem, TIMESTAMP_FORMAT).ok()
}

/// Append-only result file of one sweep run.
#[derive(Debug)]
pub struct ResultFile {
    path: PathBuf,
    file: File,
}

impl ResultFile {
    /// Creates a new result file named after the current local time inside
    /// `directory`, which must already exist. A name already taken by an
    /// earlier run in the same second is never reused: creation waits for
    /// the next second instead.
    pub fn create(directory: &Path) -> Result<Self, BenchError> {
        if !directory.is_dir() {
            return Err(BenchError::Config(
                ErrorInfo::new("output-directory", "result directory does not exist")
                    .with_path(directory)
                    .with_hint("create the directory before running the sweep"),
            ));
        }
        let mut attempt = 0;
        loop {
            attempt += 1;
            let now = Local::now();
            let path = directory.join(result_file_name(&now.naive_local()));
            match OpenOptions::new().append(true).create_new(true).open(&path) {
                Ok(file) => return Ok(Self { path, file }),
                Err(err) if err.kind() == ErrorKind::AlreadyExists && attempt < MAX_NAME_ATTEMPTS => {
                    thread::sleep(until_next_second(&now));
                }
                Err(err) => return Err(BenchError::io("result-create", &path, err)),
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `bytes` and flushes them to the operating system.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), BenchError> {
        self.file
            .write_all(bytes)
            .and_then(|_| self.file.flush())
            .map_err(|err| BenchError::io("result-append", &self.path, err))
    }
}

fn until_next_second(now: &DateTime<Local>) -> Duration {
    let elapsed = u64::from(now.nanosecond().min(999_999_999));
    Duration::from_nanos(1_000_000_000 - elapsed)
}
