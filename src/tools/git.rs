use crate::error::Result;
use crate::process::{self, ProcessOutput};
use std::path::Path;

pub fn tag_args(name: &str, message: Option<&str>) -> Vec<String> {
    match message {
        Some(msg) => vec![
            "tag".into(),
            "-a".into(),
            name.into(),
            "-m".into(),
            msg.into(),
        ],
        None => vec!["tag".into(), name.into()],
    }
}

pub fn push_args(remote: &str, include_tags: bool) -> Vec<String> {
    let mut args = vec!["push".to_string(), remote.to_string()];
    if include_tags {
        args.push("--follow-tags".into());
    }
    args
}

/// Creates a tag; annotated when a message is given.
pub fn tag(cwd: &Path, name: &str, message: Option<&str>) -> Result<ProcessOutput> {
    process::run_checked("git", &tag_args(name, message), cwd)
}

pub fn push(cwd: &Path, remote: &str, include_tags: bool) -> Result<ProcessOutput> {
    process::run_checked("git", &push_args(remote, include_tags), cwd)
}

/// Stages everything and commits.
pub fn commit_all(cwd: &Path, message: &str) -> Result<ProcessOutput> {
    process::run_checked("git", &["add", "--all"], cwd)?;
    process::run_checked("git", &["commit", "-m", message], cwd)
}

pub fn current_branch(cwd: &Path) -> Result<String> {
    let out = process::run_checked("git", &["rev-parse", "--abbrev-ref", "HEAD"], cwd)?;
    Ok(out.stdout.trim().to_string())
}

/// True when the working tree has no uncommitted changes.
pub fn is_clean(cwd: &Path) -> Result<bool> {
    let out = process::run_checked("git", &["status", "--porcelain"], cwd)?;
    Ok(out.stdout.trim().is_empty())
}
