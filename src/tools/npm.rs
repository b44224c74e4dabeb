use crate::error::Result;
use crate::process::{self, ProcessOutput};
use std::fmt;
use std::path::Path;

/// npm-family package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// Picks the manager from the lockfile present in `dir`, npm by default.
    pub fn detect(dir: &Path) -> Self {
        if dir.join("pnpm-lock.yaml").exists() {
            PackageManager::Pnpm
        } else if dir.join("yarn.lock").exists() {
            PackageManager::Yarn
        } else {
            PackageManager::Npm
        }
    }

    pub fn install_args(&self, frozen: bool) -> Vec<&'static str> {
        match (self, frozen) {
            (PackageManager::Npm, true) => vec!["ci"],
            (PackageManager::Npm, false) => vec!["install"],
            (PackageManager::Yarn, true) => vec!["install", "--frozen-lockfile"],
            (PackageManager::Yarn, false) => vec!["install"],
            (PackageManager::Pnpm, true) => vec!["install", "--frozen-lockfile"],
            (PackageManager::Pnpm, false) => vec!["install"],
        }
    }

    pub fn run_args<'a>(&self, script: &'a str) -> Vec<&'a str> {
        vec!["run", script]
    }

    pub fn install(&self, cwd: &Path, frozen: bool) -> Result<ProcessOutput> {
        process::run_checked(self.program(), &self.install_args(frozen), cwd)
    }

    pub fn run_script(&self, cwd: &Path, script: &str) -> Result<ProcessOutput> {
        process::run_checked(self.program(), &self.run_args(script), cwd)
    }

    pub fn publish(&self, cwd: &Path) -> Result<ProcessOutput> {
        process::run_checked(self.program(), &["publish"], cwd)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}
