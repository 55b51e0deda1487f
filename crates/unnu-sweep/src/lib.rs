//! Parameter sweep runner for the unnu benchmark binary.

pub mod benchmark;
pub mod grid;
pub mod output;
mod runner;

pub use benchmark::{Benchmark, Invocation, InvocationArgs, OutputMode, ProcessBenchmark};
pub use grid::{build_grid, grid_for, ParamPair};
pub use output::{parse_result_file_name, result_file_name, ResultFile};
pub use runner::{planned_invocations, run_sweep, validate_output, SweepSummary};
