//! Tool command handlers
//!
//! Handles `rk git`, `rk docker`, `rk dotnet`, `rk npm` and `rk release`.
//! Each handler prints a status line, runs the wrapper in the project
//! directory, and surfaces the tool's output when it fails.

use anyhow::Result;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use crate::config::RelkitConfig;
use crate::process::ProcessOutput;
use crate::tools::npm::PackageManager;
use crate::tools::{docker, dotnet, gh, git};

fn report(label: &str, result: crate::error::Result<ProcessOutput>, verbose: bool) -> Result<()> {
    match result {
        Ok(output) => {
            if verbose && !output.combined().is_empty() {
                println!("{}", output.combined().dimmed());
            }
            println!("{} {}", "✓".green(), label);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "x".red(), label);
            Err(e.into())
        }
    }
}

#[derive(Debug, Clone)]
pub enum GitOp {
    Tag { name: String, message: Option<String> },
    Push { remote: String, tags: bool },
    Commit { message: String },
    Status,
}

pub fn handle_git(dir: &Path, op: &GitOp, verbose: bool) -> Result<()> {
    match op {
        GitOp::Tag { name, message } => report(
            &format!("Tagged {}", name),
            git::tag(dir, name, message.as_deref()),
            verbose,
        ),
        GitOp::Push { remote, tags } => report(
            &format!("Pushed to {}", remote),
            git::push(dir, remote, *tags),
            verbose,
        ),
        GitOp::Commit { message } => report(
            "Committed all changes",
            git::commit_all(dir, message),
            verbose,
        ),
        GitOp::Status => {
            let branch = git::current_branch(dir)?;
            let clean = git::is_clean(dir)?;
            println!(
                "{} On branch {} ({})",
                "🌿".green(),
                branch.cyan(),
                if clean {
                    "clean".green()
                } else {
                    "uncommitted changes".yellow()
                }
            );
            Ok(())
        }
    }
}

#[derive(Debug, Clone)]
pub enum DockerOp {
    Build { tag: String, file: Option<PathBuf> },
    Tag { source: String, target: String },
    Push { image: String },
}

pub fn handle_docker(dir: &Path, op: &DockerOp, verbose: bool) -> Result<()> {
    println!("{} Running docker...", "🐳".blue());
    match op {
        DockerOp::Build { tag, file } => report(
            &format!("Built image {}", tag),
            docker::build(dir, tag, file.as_deref()),
            verbose,
        ),
        DockerOp::Tag { source, target } => report(
            &format!("Tagged {} as {}", source, target),
            docker::tag(dir, source, target),
            verbose,
        ),
        DockerOp::Push { image } => report(
            &format!("Pushed {}", image),
            docker::push(dir, image),
            verbose,
        ),
    }
}

#[derive(Debug, Clone)]
pub enum DotnetOp {
    Build,
    Test,
    Pack { output: Option<PathBuf> },
}

pub fn handle_dotnet(
    dir: &Path,
    op: &DotnetOp,
    project: Option<&str>,
    configuration: &str,
    verbose: bool,
) -> Result<()> {
    match op {
        DotnetOp::Build => report(
            &format!("dotnet build ({})", configuration),
            dotnet::build(dir, project, configuration),
            verbose,
        ),
        DotnetOp::Test => report(
            &format!("dotnet test ({})", configuration),
            dotnet::test(dir, project, configuration),
            verbose,
        ),
        DotnetOp::Pack { output } => report(
            &format!("dotnet pack ({})", configuration),
            dotnet::pack(dir, project, configuration, output.as_deref()),
            verbose,
        ),
    }
}

#[derive(Debug, Clone)]
pub enum NpmOp {
    Install { frozen: bool },
    Run { script: String },
    Publish,
}

pub fn handle_npm(dir: &Path, op: &NpmOp, verbose: bool) -> Result<()> {
    let pm = PackageManager::detect(dir);
    log::debug!("Detected package manager: {}", pm);
    match op {
        NpmOp::Install { frozen } => report(
            &format!("{} install", pm),
            pm.install(dir, *frozen),
            verbose,
        ),
        NpmOp::Run { script } => report(
            &format!("{} run {}", pm, script),
            pm.run_script(dir, script),
            verbose,
        ),
        NpmOp::Publish => report(&format!("{} publish", pm), pm.publish(dir), verbose),
    }
}

#[derive(Debug, Clone)]
pub enum ReleaseOp {
    Create {
        tag: String,
        title: Option<String>,
        notes: Option<String>,
        draft: bool,
    },
    Upload {
        tag: String,
        assets: Vec<PathBuf>,
        clobber: bool,
    },
}

pub fn handle_release(
    dir: &Path,
    config: &RelkitConfig,
    op: &ReleaseOp,
    verbose: bool,
) -> Result<()> {
    match op {
        ReleaseOp::Create {
            tag,
            title,
            notes,
            draft,
        } => {
            let draft = *draft || config.release.as_ref().is_some_and(|r| r.draft);
            report(
                &format!("Created release {}", tag),
                gh::release_create(dir, tag, title.as_deref(), notes.as_deref(), draft),
                verbose,
            )
        }
        ReleaseOp::Upload {
            tag,
            assets,
            clobber,
        } => {
            let assets = if assets.is_empty() {
                config
                    .release
                    .as_ref()
                    .map(|r| r.assets.clone())
                    .unwrap_or_default()
            } else {
                assets.clone()
            };
            if assets.is_empty() {
                println!("{} No assets to upload.", "!".yellow());
                return Ok(());
            }
            upload_assets(dir, tag, &assets, *clobber)
        }
    }
}

fn upload_assets(dir: &Path, tag: &str, assets: &[PathBuf], clobber: bool) -> Result<()> {
    println!(
        "{} Uploading {} asset(s) to {}...",
        "🚀".blue(),
        assets.len(),
        tag.cyan()
    );

    let pb = ProgressBar::new(assets.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )?
            .progress_chars("#>-"),
    );

    let report = gh::release_upload(dir, tag, assets, clobber, |upload| {
        let name = upload
            .asset
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if !upload.success {
            pb.suspend(|| println!("{} Failed to upload {}", "x".red(), name));
        }
        pb.set_message(name);
        pb.inc(1);
    });
    pb.finish_and_clear();

    for upload in &report.uploads {
        match &upload.error {
            None => println!("   {} {}", "+".green(), upload.asset.display()),
            Some(e) => println!("   {} {}: {}", "x".red(), upload.asset.display(), e),
        }
    }

    if !report.all_succeeded() {
        anyhow::bail!(
            "{} of {} upload(s) failed",
            report.failed().count(),
            report.uploads.len()
        );
    }
    println!("{} All assets uploaded.", "✓".green());
    Ok(())
}
