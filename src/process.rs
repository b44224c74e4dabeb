//! External process execution.
//!
//! Every invocation takes its working directory as a parameter; the
//! process-wide current directory is never changed.

use crate::error::{RelkitError, Result};
use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::Command;

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// stdout and stderr joined, for diagnostics.
    pub fn combined(&self) -> String {
        match (self.stdout.trim().is_empty(), self.stderr.trim().is_empty()) {
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr.trim_end()),
            (false, true) => self.stdout.trim_end().to_string(),
            (true, false) => self.stderr.trim_end().to_string(),
            (true, true) => String::new(),
        }
    }
}

/// Renders a command line for messages: `git tag -a v1.0`.
pub fn display_command<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let mut line = program.to_string();
    for arg in args {
        let arg = arg.as_ref().to_string_lossy();
        line.push(' ');
        if arg.contains(char::is_whitespace) {
            line.push_str(&format!("\"{}\"", arg));
        } else {
            line.push_str(&arg);
        }
    }
    line
}

/// Runs `program` in `cwd` and captures its output. A nonzero exit is not an
/// error here; see [`run_checked`].
pub fn run<S: AsRef<OsStr>>(program: &str, args: &[S], cwd: &Path) -> Result<ProcessOutput> {
    log::debug!(
        "Running `{}` in {}",
        display_command(program, args),
        cwd.display()
    );

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RelkitError::ToolMissing {
                program: program.to_string(),
            },
            _ => RelkitError::Io(e),
        })?;

    Ok(ProcessOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

/// Like [`run`], but a nonzero exit becomes [`RelkitError::CommandFailed`]
/// carrying the raw output.
pub fn run_checked<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    cwd: &Path,
) -> Result<ProcessOutput> {
    let output = run(program, args, cwd)?;
    if !output.success() {
        return Err(RelkitError::CommandFailed {
            command: display_command(program, args),
            code: output.code,
            output: output.combined(),
        });
    }
    Ok(output)
}

/// True when `program --version` can be spawned.
pub fn is_available(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .output()
        .is_ok()
}
