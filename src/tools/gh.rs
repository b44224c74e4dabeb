//! GitHub releases through the `gh` CLI.
//!
//! Asset uploads run as a rayon task group: every asset is uploaded by its own
//! task, all tasks are joined, and the outcomes are collected into one
//! [`UploadReport`]. Completion order is not guaranteed, and there is no
//! timeout or cancellation, so a hung upload holds up the whole report.

use crate::error::{RelkitError, Result};
use crate::process::{self, ProcessOutput};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub fn release_create_args(
    tag: &str,
    title: Option<&str>,
    notes: Option<&str>,
    draft: bool,
) -> Vec<String> {
    let mut args = vec!["release".to_string(), "create".to_string(), tag.to_string()];
    args.push("--title".into());
    args.push(title.unwrap_or(tag).to_string());
    match notes {
        Some(n) => {
            args.push("--notes".into());
            args.push(n.to_string());
        }
        None => args.push("--generate-notes".into()),
    }
    if draft {
        args.push("--draft".into());
    }
    args
}

pub fn release_upload_args(tag: &str, asset: &Path, clobber: bool) -> Vec<String> {
    let mut args = vec![
        "release".to_string(),
        "upload".to_string(),
        tag.to_string(),
        asset.to_string_lossy().to_string(),
    ];
    if clobber {
        args.push("--clobber".into());
    }
    args
}

pub fn release_create(
    cwd: &Path,
    tag: &str,
    title: Option<&str>,
    notes: Option<&str>,
    draft: bool,
) -> Result<ProcessOutput> {
    process::run_checked("gh", &release_create_args(tag, title, notes, draft), cwd)
}

/// Outcome of uploading one asset.
#[derive(Debug, Clone, Serialize)]
pub struct AssetUpload {
    pub asset: PathBuf,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Combined result of a parallel upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadReport {
    pub tag: String,
    pub uploads: Vec<AssetUpload>,
}

impl UploadReport {
    pub fn all_succeeded(&self) -> bool {
        self.uploads.iter().all(|u| u.success)
    }

    pub fn failed(&self) -> impl Iterator<Item = &AssetUpload> {
        self.uploads.iter().filter(|u| !u.success)
    }
}

fn upload_one(cwd: &Path, tag: &str, asset: &Path, clobber: bool) -> Result<()> {
    let resolved = if asset.is_absolute() {
        asset.to_path_buf()
    } else {
        cwd.join(asset)
    };
    if !resolved.is_file() {
        return Err(RelkitError::NotFound { path: resolved });
    }
    process::run_checked("gh", &release_upload_args(tag, asset, clobber), cwd)?;
    Ok(())
}

/// Uploads every asset to release `tag` in parallel and waits for all of them.
///
/// `on_done` is called from worker threads as each upload finishes.
pub fn release_upload<F>(
    cwd: &Path,
    tag: &str,
    assets: &[PathBuf],
    clobber: bool,
    on_done: F,
) -> UploadReport
where
    F: Fn(&AssetUpload) + Sync,
{
    let uploads = assets
        .par_iter()
        .map(|asset| {
            let outcome = upload_one(cwd, tag, asset, clobber);
            let upload = AssetUpload {
                asset: asset.clone(),
                success: outcome.is_ok(),
                error: outcome.err().map(|e| e.to_string()),
            };
            on_done(&upload);
            upload
        })
        .collect();

    UploadReport {
        tag: tag.to_string(),
        uploads,
    }
}
