//! Invocation of the external benchmark binary.
//!
//! The binary is called as `<exe> {-s|-S} -r <samples> -n <n> -m <m>`. `-s`
//! prints the field names before the values, `-S` prints values only.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;
use unnu_core::{BenchError, ErrorInfo};

use crate::grid::ParamPair;

/// Output requested from one benchmark invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Field names followed by values (`-s`).
    Header,
    /// Values only (`-S`).
    ValuesOnly,
}

impl OutputMode {
    pub fn flag(self) -> &'static str {
        match self {
            OutputMode::Header => "-s",
            OutputMode::ValuesOnly => "-S",
        }
    }
}

/// Arguments of a single benchmark invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationArgs {
    pub mode: OutputMode,
    pub sample_count: u32,
    pub pair: ParamPair,
}

impl InvocationArgs {
    /// Command line arguments in the order the benchmark expects them.
    pub fn to_args(&self) -> Vec<String> {
        vec![
            self.mode.flag().to_string(),
            "-r".to_string(),
            self.sample_count.to_string(),
            "-n".to_string(),
            self.pair.n.to_string(),
            "-m".to_string(),
            self.pair.m.to_string(),
        ]
    }

    /// Shell-like rendering used in logs and dry runs.
    pub fn command_line(&self, executable: &Path) -> String {
        let mut parts = vec![executable.display().to_string()];
        parts.extend(self.to_args());
        parts.join(" ")
    }
}

/// Outcome of one benchmark invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub success: bool,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub captured_output: Vec<u8>,
}

impl Invocation {
    /// Output of a process that exited with status zero.
    pub fn succeeded(captured_output: impl Into<Vec<u8>>) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            captured_output: captured_output.into(),
        }
    }

    pub fn failed(exit_code: Option<i32>, captured_output: impl Into<Vec<u8>>) -> Self {
        Self {
            success: false,
            exit_code,
            captured_output: captured_output.into(),
        }
    }

    /// Converts an unsuccessful invocation into a recoverable error.
    pub fn check(&self, args: &InvocationArgs) -> Result<(), BenchError> {
        if self.success {
            return Ok(());
        }
        let status = match self.exit_code {
            Some(code) => code.to_string(),
            None => "signal".to_string(),
        };
        Err(BenchError::Process(
            ErrorInfo::new("exit-status", "benchmark exited unsuccessfully")
                .with_context("status", status)
                .with_context("n", args.pair.n.to_string())
                .with_context("m", args.pair.m.to_string())
                .with_context("flag", args.mode.flag())
                .with_context("captured_bytes", self.captured_output.len().to_string()),
        ))
    }
}

/// Something that can run the benchmark for one parameter pair.
pub trait Benchmark {
    /// Runs one invocation to completion. Launch failures are errors; a
    /// process that ran but exited unsuccessfully is an [`Invocation`] with
    /// `success == false`.
    fn invoke(&mut self, args: &InvocationArgs) -> Result<Invocation, BenchError>;
}

/// Runs the benchmark as a child process and captures its standard output.
#[derive(Debug, Clone)]
pub struct ProcessBenchmark {
    executable: PathBuf,
}

impl ProcessBenchmark {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

impl Benchmark for ProcessBenchmark {
    fn invoke(&mut self, args: &InvocationArgs) -> Result<Invocation, BenchError> {
        debug!(command = %args.command_line(&self.executable), "launching benchmark");
        let child = Command::new(&self.executable)
            .args(args.to_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|err| {
                BenchError::Process(
                    ErrorInfo::new("spawn", "failed to launch benchmark executable")
                        .with_path(&self.executable)
                        .with_context("kind", format!("{:?}", err.kind()))
                        .with_hint(format!("check executable_path ({err})")),
                )
            })?;
        let output = child.wait_with_output().map_err(|err| {
            BenchError::Process(
                ErrorInfo::new("wait", "failed to collect benchmark output")
                    .with_path(&self.executable)
                    .with_hint(err.to_string()),
            )
        })?;
        if output.status.success() {
            Ok(Invocation::succeeded(output.stdout))
        } else {
            Ok(Invocation::failed(output.status.code(), output.stdout))
        }
    }
}
