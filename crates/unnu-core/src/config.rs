use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{BenchError, ErrorInfo};

/// Half-open integer range `[start, stop)` walked with a positive `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    /// First value.
    pub start: u64,
    /// Exclusive upper bound.
    pub stop: u64,
    /// Distance between consecutive values; defaults to 1.
    #[serde(default = "default_step")]
    pub step: u64,
}

fn default_step() -> u64 {
    1
}

impl IntRange {
    /// Range `[start, stop)` walked by `step`.
    pub const fn new(start: u64, stop: u64, step: u64) -> Self {
        Self { start, stop, step }
    }

    /// Values of the range in ascending order. A zero step yields nothing;
    /// [`IntRange::validate`] rejects it before a sweep gets this far.
    pub fn values(&self) -> impl Iterator<Item = u64> {
        let Self { start, stop, step } = *self;
        let count = if step == 0 || start >= stop {
            0
        } else {
            (stop - start).div_ceil(step)
        };
        (0..count).map(move |idx| start + idx * step)
    }

    /// Number of values the range yields.
    pub fn len(&self) -> usize {
        self.values().count()
    }

    /// True when the range yields no value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rejects a zero step; `name` identifies the range in the error context.
    pub fn validate(&self, name: &str) -> Result<(), BenchError> {
        if self.step == 0 {
            return Err(BenchError::Config(
                ErrorInfo::new("range-step", "range step must be positive")
                    .with_context("range", name)
                    .with_context("start", self.start.to_string())
                    .with_context("stop", self.stop.to_string()),
            ));
        }
        Ok(())
    }
}

/// Reaction of the runner to a benchmark invocation that exits unsuccessfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the run and return the error.
    #[default]
    Abort,
    /// Log the failure, discard its output and continue with the next pair.
    Skip,
}

/// Explicit configuration of one sweep run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Range of the `n` parameter.
    #[serde(default = "SweepConfig::default_range")]
    pub n_range: IntRange,
    /// Range of the `m` parameter; `None` reuses `n_range` for both.
    #[serde(default)]
    pub m_range: Option<IntRange>,
    /// Repetitions the benchmark averages over for every pair.
    #[serde(default = "SweepConfig::default_sample_count")]
    pub sample_count: u32,
    /// Benchmark binary launched once per pair.
    #[serde(default = "SweepConfig::default_executable")]
    pub executable_path: PathBuf,
    /// Existing directory receiving the result file.
    #[serde(default = "SweepConfig::default_output_directory")]
    pub output_directory: PathBuf,
    /// Whether the `# Sampling = S` comment line opens the result file.
    #[serde(default = "SweepConfig::default_write_sample_comment")]
    pub write_sample_comment: bool,
    /// What a failing invocation does to the run.
    #[serde(default)]
    pub on_failure: FailurePolicy,
}

impl SweepConfig {
    const fn default_range() -> IntRange {
        IntRange::new(1, 10_000, 1_000)
    }

    const fn default_sample_count() -> u32 {
        100
    }

    fn default_executable() -> PathBuf {
        PathBuf::from("./bench")
    }

    fn default_output_directory() -> PathBuf {
        PathBuf::from("./results")
    }

    const fn default_write_sample_comment() -> bool {
        true
    }

    /// Range driving the `m` parameter.
    pub fn m_range(&self) -> IntRange {
        self.m_range.unwrap_or(self.n_range)
    }

    /// Loads a YAML configuration; absent keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, BenchError> {
        let text = fs::read_to_string(path).map_err(|err| {
            BenchError::Config(
                ErrorInfo::new("config-read", "failed to read sweep configuration")
                    .with_path(path)
                    .with_hint(err.to_string()),
            )
        })?;
        let config = Self::from_yaml(&text).map_err(|err| match err {
            BenchError::Config(info) => BenchError::Config(info.with_path(path)),
            other => other,
        })?;
        Ok(config)
    }

    /// Parses and validates a YAML configuration document.
    pub fn from_yaml(text: &str) -> Result<Self, BenchError> {
        let config: SweepConfig = serde_yaml::from_str(text).map_err(|err| {
            BenchError::Config(
                ErrorInfo::new("config-parse", "malformed sweep configuration")
                    .with_hint(err.to_string()),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges, sample count and executable path.
    pub fn validate(&self) -> Result<(), BenchError> {
        self.n_range.validate("n_range")?;
        if let Some(m_range) = &self.m_range {
            m_range.validate("m_range")?;
        }
        if self.sample_count == 0 {
            return Err(BenchError::Config(ErrorInfo::new(
                "sample-count",
                "sample count must be positive",
            )));
        }
        if self.executable_path.as_os_str().is_empty() {
            return Err(BenchError::Config(ErrorInfo::new(
                "executable-path",
                "benchmark executable path is empty",
            )));
        }
        Ok(())
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            n_range: Self::default_range(),
            m_range: None,
            sample_count: Self::default_sample_count(),
            executable_path: Self::default_executable(),
            output_directory: Self::default_output_directory(),
            write_sample_comment: Self::default_write_sample_comment(),
            on_failure: FailurePolicy::default(),
        }
    }
}
