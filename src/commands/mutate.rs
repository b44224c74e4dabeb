//! Version and stamp command handlers
//!
//! Handles `rk version set|bump` and `rk stamp`. Pattern and file list fall
//! back to the `[version]` / `[stamp]` sections of `relkit.toml`.

use anyhow::{Context, Result, anyhow};
use colored::*;
use std::path::{Path, PathBuf};

use crate::batch::{self, BatchOptions, MutationMode, MutationResult};
use crate::config::MutationConfig;
use crate::pattern;
use crate::ui;

/// Command-line inputs shared by `version` and `stamp`.
#[derive(Debug, Clone, Default)]
pub struct MutationArgs {
    pub files: Vec<PathBuf>,
    pub pattern: Option<String>,
    pub backup: bool,
    pub dry_run: bool,
    pub json: bool,
}

/// Resolved pattern, files (relative to `project_dir`) and options.
pub fn resolve_inputs(
    project_dir: &Path,
    args: &MutationArgs,
    section: Option<&MutationConfig>,
    section_name: &str,
) -> Result<(String, Vec<PathBuf>, BatchOptions)> {
    let pattern = args
        .pattern
        .clone()
        .or_else(|| section.and_then(|s| s.pattern.clone()))
        .ok_or_else(|| {
            anyhow!(
                "No pattern given. Pass --pattern or set `pattern` under [{}] in relkit.toml",
                section_name
            )
        })?;

    let files = if args.files.is_empty() {
        section.map(|s| s.files.clone()).unwrap_or_default()
    } else {
        args.files.clone()
    };
    if files.is_empty() {
        return Err(anyhow!(
            "No files given. Pass file paths or set `files` under [{}] in relkit.toml",
            section_name
        ));
    }

    let files = files
        .into_iter()
        .map(|f| if f.is_absolute() { f } else { project_dir.join(f) })
        .collect();

    let options = BatchOptions {
        backup: args.backup || section.is_some_and(|s| s.backup),
        dry_run: args.dry_run,
    };
    Ok((pattern, files, options))
}

/// Runs the batch, reports it, and fails when any file failed.
pub fn run_mutation(
    project_dir: &Path,
    args: &MutationArgs,
    section: Option<&MutationConfig>,
    section_name: &str,
    mode: MutationMode,
) -> Result<Vec<MutationResult>> {
    let (pattern_src, files, options) = resolve_inputs(project_dir, args, section, section_name)?;
    let regex = pattern::compile(&pattern_src).context("Invalid --pattern")?;

    if options.dry_run && !args.json {
        println!("{} Dry run, no files will be written", "!".yellow());
    }

    let results = batch::apply(&files, &regex, &mode, options);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&results).context("Failed to serialize results")?
        );
    } else {
        ui::print_results(&results, options.dry_run);
    }

    if !batch::all_succeeded(&results) {
        return Err(anyhow!(
            "{} of {} file(s) failed",
            results.iter().filter(|r| !r.success).count(),
            results.len()
        ));
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_config_fallback_for_pattern_and_files() {
        let section = MutationConfig {
            pattern: Some(r"v=(\S+)".into()),
            files: vec![PathBuf::from("a.txt")],
            backup: true,
        };
        let (pattern, files, options) =
            resolve_inputs(Path::new("/proj"), &MutationArgs::default(), Some(&section), "version")
                .unwrap();
        assert_eq!(pattern, r"v=(\S+)");
        assert_eq!(files, vec![PathBuf::from("/proj/a.txt")]);
        assert!(options.backup);
    }

    #[test]
    fn test_cli_overrides_config() {
        let section = MutationConfig {
            pattern: Some("cfg=(\\d+)".into()),
            files: vec![PathBuf::from("cfg.txt")],
            backup: false,
        };
        let args = MutationArgs {
            files: vec![PathBuf::from("/abs/cli.txt")],
            pattern: Some("cli=(\\d+)".into()),
            ..Default::default()
        };
        let (pattern, files, _) =
            resolve_inputs(Path::new("/proj"), &args, Some(&section), "stamp").unwrap();
        assert_eq!(pattern, "cli=(\\d+)");
        assert_eq!(files, vec![PathBuf::from("/abs/cli.txt")]);
    }

    #[test]
    fn test_missing_pattern_is_error() {
        let args = MutationArgs {
            files: vec![PathBuf::from("a")],
            ..Default::default()
        };
        assert!(resolve_inputs(Path::new("."), &args, None, "version").is_err());
    }

    #[test]
    fn test_run_mutation_reports_failure_but_processes_all() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.txt"), "v=1.0.0.0").unwrap();
        fs::write(dir.path().join("bad.txt"), "nothing").unwrap();

        let args = MutationArgs {
            files: vec!["bad.txt".into(), "good.txt".into()],
            pattern: Some(r"v=(\S+)".into()),
            json: true,
            ..Default::default()
        };
        let result = run_mutation(dir.path(), &args, None, "version", MutationMode::Bump);
        assert!(result.is_err());
        assert_eq!(
            fs::read_to_string(dir.path().join("good.txt")).unwrap(),
            "v=1.0.0.1"
        );
    }
}
