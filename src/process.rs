//! The process primitive: run a program to completion and capture its output.
//!
//! [`ProcessRunner`] is the seam between command execution and the OS.
//! [`SystemRunner`] blocks on `std::process`, [`run_async`] awaits `tokio::process`.

use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};

use tracing::{debug, trace};

use crate::error::{CommandError, ExecutionFailure, ResourceAccessFailure, ResourceKind};

/// A fully resolved process launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    pub program: String,
    pub arguments: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl ProcessRequest {
    pub fn new(program: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            program: program.into(),
            arguments,
            working_dir: None,
        }
    }

    #[must_use]
    pub fn working_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.working_dir = dir;
        self
    }
}

/// Runs a process to completion, returning captured stdout on success.
pub trait ProcessRunner {
    fn run(&self, request: &ProcessRequest) -> Result<String, CommandError>;
}

/// Blocking runner backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, request: &ProcessRequest) -> Result<String, CommandError> {
        check_working_dir(request.working_dir.as_deref())?;

        let mut command = std::process::Command::new(&request.program);
        command
            .args(&request.arguments)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &request.working_dir {
            command.current_dir(dir);
        }

        debug!(program = %request.program, args = ?request.arguments, "Spawning process");
        let output = command
            .output()
            .map_err(|err| ExecutionFailure::spawn(&request.program, &err))?;
        collect(&request.program, output)
    }
}

/// Async counterpart of [`SystemRunner`] backed by `tokio::process::Command`.
pub async fn run_async(request: &ProcessRequest) -> Result<String, CommandError> {
    check_working_dir_async(request.working_dir.as_deref()).await?;

    let mut command = tokio::process::Command::new(&request.program);
    command
        .args(&request.arguments)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(dir) = &request.working_dir {
        command.current_dir(dir);
    }

    debug!(program = %request.program, args = ?request.arguments, "Spawning process (async)");
    let output = command
        .output()
        .await
        .map_err(|err| ExecutionFailure::spawn(&request.program, &err))?;
    collect(&request.program, output)
}

/// Ensure `dir` exists and is a directory before anything is spawned.
pub fn check_working_dir(dir: Option<&Path>) -> Result<(), CommandError> {
    match dir {
        Some(dir) => classify_working_dir(dir, std::fs::metadata(dir)),
        None => Ok(()),
    }
}

/// [`check_working_dir`] without blocking the runtime.
pub async fn check_working_dir_async(dir: Option<&Path>) -> Result<(), CommandError> {
    match dir {
        Some(dir) => classify_working_dir(dir, tokio::fs::metadata(dir).await),
        None => Ok(()),
    }
}

fn classify_working_dir(dir: &Path, metadata: io::Result<Metadata>) -> Result<(), CommandError> {
    match metadata {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ResourceAccessFailure::new(
            ResourceKind::Location,
            dir,
            io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        )
        .into()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(ResourceAccessFailure::new(ResourceKind::Location, dir, err).into())
        }
        Err(err) => Err(ResourceAccessFailure::new(ResourceKind::Read, dir, err).into()),
    }
}

fn collect(program: &str, output: Output) -> Result<String, CommandError> {
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    trace!(program, status = ?output.status, stdout_len = stdout.len(), "Process exited");

    if output.status.success() {
        Ok(stdout)
    } else {
        Err(ExecutionFailure::exited(program, output.status.code(), stdout, stderr).into())
    }
}
