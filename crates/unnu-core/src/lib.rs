#![deny(missing_docs)]
#![doc = "Shared configuration, error and result-file protocol types for the unnu benchmark tools."]

/// Sweep configuration types.
pub mod config;
pub mod errors;
pub mod protocol;

pub use config::{FailurePolicy, IntRange, SweepConfig};
pub use errors::{BenchError, ErrorInfo};
pub use protocol::{read_records, sample_comment, LineRecord, Record, SchemaTracker};
