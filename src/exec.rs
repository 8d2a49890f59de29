//! Subprocess execution helpers
//!
//! Delegated steps (package installs, CMake, ctest, doxygen, clang-format) run
//! with inherited stdio so their own progress output reaches the terminal.
//! Probes (compiler macro dumps, sysctl, git plumbing) capture output instead.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use crate::error::CbError;

/// Captured result of a probe command
#[derive(Debug)]
pub struct CommandOutput {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

/// Run a command and capture its output
pub fn run_captured<S: AsRef<OsStr>>(program: &str, args: &[S]) -> Result<CommandOutput> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("Failed to execute {}", program))?;

    Ok(CommandOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

/// Run a delegated step with inherited stdio
///
/// Any non-zero exit is fatal and reported as the failure of `step`; the
/// remaining steps of the current invocation never run.
pub fn run_step<S: AsRef<OsStr>>(
    step: &str,
    program: &str,
    args: &[S],
    cwd: Option<&Path>,
    verbose: bool,
) -> Result<(), CbError> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdin(Stdio::inherit());
    cmd.stdout(Stdio::inherit());
    cmd.stderr(Stdio::inherit());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    if verbose {
        eprintln!("Running: {:?}", cmd);
    }

    let status = cmd.status().map_err(|e| CbError::ExternalProcess {
        step: step.to_string(),
        message: format!("failed to spawn {}", program),
        source: Some(e.into()),
    })?;

    if !status.success() {
        return Err(CbError::external_process(
            step,
            format!("{} exited with {:?}", program, status.code()),
        ));
    }

    Ok(())
}

/// Check if a command exists in PATH
pub fn command_exists(program: &str) -> bool {
    which::which(program).is_ok()
}
