//! Structured error types shared across the unnu tools.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message and context carried by every [`BenchError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable kebab-case code, e.g. `missing-column`.
    pub code: String,
    /// Human readable diagnostic.
    pub message: String,
    /// Contextual key value pairs (paths, column names, exit codes).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested remedy, when one is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds or replaces one context entry.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Adds the `path` context entry.
    pub fn with_path(self, path: &Path) -> Self {
        self.with_context("path", path.display().to_string())
    }

    /// Sets the remedy hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the sweep runner and the plotter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum BenchError {
    /// Invalid or unreadable sweep configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Filesystem failures while creating, appending or reading files.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Benchmark executable failed to launch or exited unsuccessfully.
    #[error("process error: {0}")]
    Process(ErrorInfo),
    /// Malformed result files and missing columns.
    #[error("table error: {0}")]
    Table(ErrorInfo),
    /// Triangulation and drawing failures.
    #[error("render error: {0}")]
    Render(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            write!(f, " | context: [{}]", pairs.join(", "))?;
        }
        match &self.hint {
            Some(hint) => write!(f, " | hint: {hint}"),
            None => Ok(()),
        }
    }
}

impl BenchError {
    /// Payload of any family.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            BenchError::Config(info)
            | BenchError::Io(info)
            | BenchError::Process(info)
            | BenchError::Table(info)
            | BenchError::Render(info) => info,
        }
    }

    /// Shorthand for `self.info().code`.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Wraps an I/O error raised while operating on `path`.
    pub fn io(code: &str, path: &Path, err: std::io::Error) -> Self {
        BenchError::Io(
            ErrorInfo::new(code, err.to_string())
                .with_path(path)
                .with_context("kind", format!("{:?}", err.kind())),
        )
    }
}
