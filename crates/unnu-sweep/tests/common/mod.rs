#![allow(dead_code)]

use std::path::Path;

use unnu_core::{BenchError, ErrorInfo, IntRange, SweepConfig};
use unnu_sweep::{Benchmark, Invocation, InvocationArgs, OutputMode};

/// In-process stand-in for the benchmark binary that records every call.
#[derive(Debug, Default)]
pub struct RecordingBenchmark {
    pub calls: Vec<InvocationArgs>,
    /// Zero-based call indices that exit with status 1.
    pub failing_calls: Vec<usize>,
    /// Call index at which the benchmark can no longer be launched.
    pub interrupt_at: Option<usize>,
}

impl RecordingBenchmark {
    pub fn flags(&self) -> Vec<&'static str> {
        self.calls.iter().map(|args| args.mode.flag()).collect()
    }
}

impl Benchmark for RecordingBenchmark {
    fn invoke(&mut self, args: &InvocationArgs) -> Result<Invocation, BenchError> {
        let idx = self.calls.len();
        self.calls.push(*args);
        if self.interrupt_at == Some(idx) {
            return Err(BenchError::Process(ErrorInfo::new(
                "interrupted",
                "benchmark interrupted",
            )));
        }
        let mut output = String::new();
        if args.mode == OutputMode::Header {
            output.push_str("n, max, unnu\n");
        }
        output.push_str(&format!("{}, {}, 0.5\n", args.pair.n, args.pair.m));
        if self.failing_calls.contains(&idx) {
            Ok(Invocation::failed(Some(1), output))
        } else {
            Ok(Invocation::succeeded(output))
        }
    }
}

pub fn small_config(output_directory: &Path) -> SweepConfig {
    SweepConfig {
        n_range: IntRange::new(1, 4, 1),
        sample_count: 10,
        output_directory: output_directory.to_path_buf(),
        ..SweepConfig::default()
    }
}
