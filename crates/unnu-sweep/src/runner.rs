use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, warn};
use unnu_core::{
    read_records, sample_comment, BenchError, ErrorInfo, FailurePolicy, SchemaTracker,
    SweepConfig,
};

use crate::benchmark::{Benchmark, InvocationArgs, OutputMode};
use crate::grid::{grid_for, ParamPair};
use crate::output::ResultFile;

/// Outcome of a completed sweep run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    pub result_path: PathBuf,
    pub pairs: usize,
    /// Invocations whose output was appended to the result file.
    pub appended: usize,
    /// Failed invocations dropped under [`FailurePolicy::Skip`].
    pub skipped: usize,
    /// Protocol violations noticed in appended output.
    pub protocol_warnings: usize,
}

/// Invocations a run performs when every invocation succeeds.
pub fn planned_invocations(config: &SweepConfig) -> Vec<InvocationArgs> {
    grid_for(config)
        .into_iter()
        .enumerate()
        .map(|(idx, pair)| invocation_args(config, pair, idx == 0))
        .collect()
}

/// Runs the benchmark once per grid pair, strictly one after another, and
/// appends each successful invocation's output to a fresh result file.
///
/// Only the first appended output requests the header. A failing invocation
/// aborts the run or is skipped depending on [`SweepConfig::on_failure`];
/// either way its output never reaches the file.
pub fn run_sweep<B: Benchmark>(
    config: &SweepConfig,
    benchmark: &mut B,
) -> Result<SweepSummary, BenchError> {
    config.validate()?;
    let grid = grid_for(config);
    let mut results = ResultFile::create(&config.output_directory)?;
    info!(
        path = %results.path().display(),
        pairs = grid.len(),
        samples = config.sample_count,
        "starting sweep"
    );
    if config.write_sample_comment {
        results.append(sample_comment(config.sample_count).as_bytes())?;
    }

    let mut summary = SweepSummary {
        result_path: results.path().to_path_buf(),
        pairs: grid.len(),
        appended: 0,
        skipped: 0,
        protocol_warnings: 0,
    };
    let mut tracker = SchemaTracker::new();
    let mut header_pending = true;
    for (idx, pair) in grid.into_iter().enumerate() {
        let args = invocation_args(config, pair, header_pending);
        debug!(idx, n = pair.n, m = pair.m, flag = args.mode.flag(), "invoking benchmark");
        let invocation = benchmark.invoke(&args)?;
        if let Err(err) = invocation.check(&args) {
            match config.on_failure {
                FailurePolicy::Abort => return Err(err),
                FailurePolicy::Skip => {
                    warn!(n = pair.n, m = pair.m, error = %err, "skipping failed invocation");
                    summary.skipped += 1;
                    continue;
                }
            }
        }
        for violation in validate_output(&invocation.captured_output, args.mode, &mut tracker) {
            warn!(n = pair.n, m = pair.m, error = %violation, "unexpected benchmark output");
            summary.protocol_warnings += 1;
        }
        results.append(&invocation.captured_output)?;
        header_pending = false;
        summary.appended += 1;
    }
    info!(
        path = %summary.result_path.display(),
        appended = summary.appended,
        skipped = summary.skipped,
        "sweep finished"
    );
    Ok(summary)
}

fn invocation_args(config: &SweepConfig, pair: ParamPair, header_pending: bool) -> InvocationArgs {
    InvocationArgs {
        mode: if header_pending {
            OutputMode::Header
        } else {
            OutputMode::ValuesOnly
        },
        sample_count: config.sample_count,
        pair,
    }
}

/// Checks one invocation's output against the record protocol, continuing
/// the schema established by earlier output of the same run.
pub fn validate_output(
    output: &[u8],
    mode: OutputMode,
    tracker: &mut SchemaTracker,
) -> Vec<BenchError> {
    let records = match read_records(output) {
        Ok(records) => records,
        Err(err) => return vec![err],
    };
    let mut violations = Vec::new();
    let header_seen = records.iter().any(|entry| entry.record.is_header());
    match mode {
        OutputMode::Header if !header_seen => violations.push(BenchError::Table(
            ErrorInfo::new("missing-header", "header output contains no field names")
                .with_context("flag", mode.flag()),
        )),
        OutputMode::ValuesOnly if header_seen => violations.push(BenchError::Table(
            ErrorInfo::new("unexpected-header", "value-only output contains field names")
                .with_context("flag", mode.flag()),
        )),
        _ => {}
    }
    for entry in &records {
        if let Err(err) = tracker.push(entry) {
            violations.push(err);
        }
    }
    violations
}
