use crate::error::Result;
use crate::process::{self, ProcessOutput};
use std::path::Path;

pub fn build_args(tag: &str, dockerfile: Option<&Path>) -> Vec<String> {
    let mut args = vec!["build".to_string(), "-t".to_string(), tag.to_string()];
    if let Some(file) = dockerfile {
        args.push("-f".into());
        args.push(file.to_string_lossy().to_string());
    }
    args.push(".".into());
    args
}

/// `docker build -t <tag> [-f <dockerfile>] .` with `cwd` as context.
pub fn build(cwd: &Path, tag: &str, dockerfile: Option<&Path>) -> Result<ProcessOutput> {
    process::run_checked("docker", &build_args(tag, dockerfile), cwd)
}

pub fn tag(cwd: &Path, source: &str, target: &str) -> Result<ProcessOutput> {
    process::run_checked("docker", &["tag", source, target], cwd)
}

pub fn push(cwd: &Path, image: &str) -> Result<ProcessOutput> {
    process::run_checked("docker", &["push", image], cwd)
}
