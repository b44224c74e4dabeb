//! Applies a version or stamp mutation to a list of files.
//!
//! Each file is read, rewritten in memory and written back on its own. A
//! failure on one file is recorded in its [`MutationResult`] and the batch
//! moves on to the next file.

use crate::error::{RelkitError, Result};
use crate::stamp::{self, StampSource};
use crate::version::{self, Rewrite};
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// What to do with the token captured in each file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationMode {
    /// Write this exact version string.
    Set(String),
    /// Increment with build-digit rollover.
    Bump,
    /// Replace with an epoch-seconds stamp.
    Stamp(StampSource),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Copy the original to `<file>.backup` before writing.
    pub backup: bool,
    /// Compute results without touching any file.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MutationError {
    pub kind: &'static str,
    pub message: String,
}

impl From<&RelkitError> for MutationError {
    fn from(e: &RelkitError) -> Self {
        Self {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

/// Per-file outcome of a batch.
#[derive(Debug, Clone, Serialize)]
pub struct MutationResult {
    pub file: PathBuf,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<MutationError>,
}

impl MutationResult {
    fn failed(file: &Path, err: &RelkitError) -> Self {
        Self {
            file: file.to_path_buf(),
            success: false,
            old_value: None,
            new_value: None,
            changed: false,
            error: Some(err.into()),
        }
    }

    pub fn error_kind(&self) -> Option<&'static str> {
        self.error.as_ref().map(|e| e.kind)
    }
}

/// Sibling path used for backups: `file.ext` becomes `file.ext.backup`.
pub fn backup_path(file: &Path) -> PathBuf {
    let mut name = file.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}

/// Runs `mode` against one file's content.
pub fn mutate_content(content: &str, regex: &Regex, mode: &MutationMode) -> Result<Rewrite> {
    match mode {
        MutationMode::Set(new_version) => {
            let rewrite = version::set_version(content, regex, new_version);
            if rewrite.old_value.is_none() {
                return Err(RelkitError::PatternNotMatched {
                    pattern: regex.as_str().to_string(),
                });
            }
            Ok(rewrite)
        }
        MutationMode::Bump => version::bump_version(content, regex),
        MutationMode::Stamp(source) => stamp::update_stamp(content, regex, source),
    }
}

fn apply_one(
    file: &Path,
    regex: &Regex,
    mode: &MutationMode,
    options: BatchOptions,
) -> Result<Rewrite> {
    if !file.is_file() {
        return Err(RelkitError::NotFound {
            path: file.to_path_buf(),
        });
    }

    let content = fs::read_to_string(file)?;
    let rewrite = mutate_content(&content, regex, mode)?;

    if rewrite.changed && !options.dry_run {
        if options.backup {
            let backup = backup_path(file);
            log::debug!("Backing up {} to {}", file.display(), backup.display());
            fs::copy(file, &backup).map_err(|source| RelkitError::WriteFailure {
                path: backup.clone(),
                source,
            })?;
        }
        fs::write(file, &rewrite.content).map_err(|source| RelkitError::WriteFailure {
            path: file.to_path_buf(),
            source,
        })?;
    }

    Ok(rewrite)
}

/// Applies `mode` to every file in order. Never stops early.
pub fn apply<P: AsRef<Path>>(
    files: &[P],
    regex: &Regex,
    mode: &MutationMode,
    options: BatchOptions,
) -> Vec<MutationResult> {
    files
        .iter()
        .map(|file| {
            let file = file.as_ref();
            match apply_one(file, regex, mode, options) {
                Ok(rewrite) => MutationResult {
                    file: file.to_path_buf(),
                    success: true,
                    old_value: rewrite.old_value,
                    new_value: rewrite.new_value,
                    changed: rewrite.changed,
                    error: None,
                },
                Err(e) => {
                    log::debug!("{}: {}", file.display(), e);
                    MutationResult::failed(file, &e)
                }
            }
        })
        .collect()
}

/// True when every file in the batch succeeded.
pub fn all_succeeded(results: &[MutationResult]) -> bool {
    results.iter().all(|r| r.success)
}
