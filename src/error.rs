//! Error taxonomy shared by the template, version, stamp and process layers.
//!
//! Per-file failures in a batch are captured as values (see [`crate::batch`]);
//! nothing in the core panics or aborts a batch.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelkitError {
    /// Template or target file does not exist.
    #[error("not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The version or stamp pattern matched nothing.
    #[error("pattern not found: {pattern}")]
    PatternNotMatched { pattern: String },

    /// Extracted version is not dotted integers. Recovered by falling back to
    /// the baseline, only surfaced through logs.
    #[error("malformed version '{value}'")]
    MalformedVersion { value: String },

    #[error("failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("configuration error: {0}")]
    Config(String),

    /// External command exited with a nonzero status.
    #[error("`{command}` failed ({}):\n{output}", describe_exit(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    #[error("'{program}' was not found on PATH")]
    ToolMissing { program: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl RelkitError {
    /// Short machine-friendly name, used in result tables and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            RelkitError::NotFound { .. } => "NotFound",
            RelkitError::PatternNotMatched { .. } => "PatternNotMatched",
            RelkitError::MalformedVersion { .. } => "MalformedVersion",
            RelkitError::WriteFailure { .. } => "WriteFailure",
            RelkitError::InvalidPattern(_) => "InvalidPattern",
            RelkitError::Config(_) => "Config",
            RelkitError::CommandFailed { .. } => "CommandFailed",
            RelkitError::ToolMissing { .. } => "ToolMissing",
            RelkitError::Io(_) => "Io",
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "terminated by signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, RelkitError>;
