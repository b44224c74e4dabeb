use crate::error::Result;
use crate::process::{self, ProcessOutput};
use std::path::Path;

/// `dotnet <verb> [project] -c <configuration> [extra...]`
pub fn verb_args(
    verb: &str,
    project: Option<&str>,
    configuration: &str,
    extra: &[String],
) -> Vec<String> {
    let mut args = vec![verb.to_string()];
    if let Some(p) = project {
        args.push(p.to_string());
    }
    args.push("-c".into());
    args.push(configuration.to_string());
    args.extend(extra.iter().cloned());
    args
}

pub fn build(cwd: &Path, project: Option<&str>, configuration: &str) -> Result<ProcessOutput> {
    process::run_checked("dotnet", &verb_args("build", project, configuration, &[]), cwd)
}

pub fn test(cwd: &Path, project: Option<&str>, configuration: &str) -> Result<ProcessOutput> {
    process::run_checked("dotnet", &verb_args("test", project, configuration, &[]), cwd)
}

/// Packs into `output` when given, otherwise dotnet's default location.
pub fn pack(
    cwd: &Path,
    project: Option<&str>,
    configuration: &str,
    output: Option<&Path>,
) -> Result<ProcessOutput> {
    let extra = match output {
        Some(dir) => vec!["-o".to_string(), dir.to_string_lossy().to_string()],
        None => Vec::new(),
    };
    process::run_checked("dotnet", &verb_args("pack", project, configuration, &extra), cwd)
}
