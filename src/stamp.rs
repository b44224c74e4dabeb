//! Build stamps: an epoch-seconds integer embedded in a file.
//!
//! Both time sources go through `chrono::DateTime<Utc>` before being turned
//! into seconds, so "now" and a file's mtime share the same UTC baseline.

use crate::error::{RelkitError, Result};
use crate::pattern;
use crate::version::Rewrite;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Where the new stamp value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StampSource {
    CurrentTime,
    /// Modification time of the given file.
    FileModified(PathBuf),
}

impl StampSource {
    /// Resolves the source to whole seconds since 1970-01-01T00:00:00Z.
    pub fn epoch_seconds(&self) -> Result<i64> {
        match self {
            StampSource::CurrentTime => Ok(epoch_seconds(Utc::now())),
            StampSource::FileModified(path) => file_mtime_seconds(path),
        }
    }
}

/// Floor of the seconds elapsed since the Unix epoch.
pub fn epoch_seconds(at: DateTime<Utc>) -> i64 {
    at.timestamp()
}

fn file_mtime_seconds(path: &Path) -> Result<i64> {
    if !path.exists() {
        return Err(RelkitError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let modified: SystemTime = fs::metadata(path)?.modified()?;
    Ok(epoch_seconds(DateTime::<Utc>::from(modified)))
}

/// Replaces the stamp captured by group 1 of the first match.
pub fn update_stamp(content: &str, regex: &Regex, source: &StampSource) -> Result<Rewrite> {
    let (old, span) =
        pattern::find_token(regex, content).ok_or_else(|| RelkitError::PatternNotMatched {
            pattern: regex.as_str().to_string(),
        })?;

    if old.parse::<u64>().is_err() {
        log::warn!("Existing stamp '{}' is not an integer, replacing it", old);
    }

    let new = source.epoch_seconds()?.to_string();
    log::debug!("Stamping {} -> {}", old, new);

    let old = old.to_string();
    let updated = pattern::splice(content, span, &new);
    Ok(Rewrite {
        changed: updated != content,
        content: updated,
        old_value: Some(old),
        new_value: Some(new),
    })
}
