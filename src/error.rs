//! Failure types surfaced by command execution.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Everything that can go wrong while executing a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be spawned or exited unsuccessfully.
    #[error(transparent)]
    Execution(#[from] ExecutionFailure),

    /// A filesystem location needed by the invocation could not be used.
    #[error(transparent)]
    ResourceAccess(#[from] ResourceAccessFailure),
}

impl CommandError {
    /// Standard output captured before the failure. Empty for resource failures.
    pub fn stdout(&self) -> &str {
        match self {
            Self::Execution(failure) => &failure.stdout,
            Self::ResourceAccess(_) => "",
        }
    }

    /// Standard error captured before the failure. Empty for resource failures.
    pub fn stderr(&self) -> &str {
        match self {
            Self::Execution(failure) => &failure.stderr,
            Self::ResourceAccess(_) => "",
        }
    }

    pub const fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }
}

/// A child process that failed to start or exited abnormally.
///
/// Spawn failures and non-zero exits share this shape; `exit_code` is `None`
/// when the process never ran or was terminated by a signal.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ExecutionFailure {
    pub message: String,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl ExecutionFailure {
    /// The child never ran, so its stderr is the spawn diagnostic itself.
    pub(crate) fn spawn(program: &str, err: &std::io::Error) -> Self {
        let message = format!("failed to run '{program}': {err}");
        Self {
            stderr: format!("{message}\n"),
            message,
            stdout: String::new(),
            exit_code: None,
        }
    }

    pub(crate) fn exited(program: &str, exit_code: Option<i32>, stdout: String, stderr: String) -> Self {
        let message = match exit_code {
            Some(code) => format!("'{program}' exited with status {code}"),
            None => format!("'{program}' was terminated by a signal"),
        };
        Self {
            message,
            stdout,
            stderr,
            exit_code,
        }
    }
}

/// Which filesystem operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// The path does not exist or is not the expected kind of entry.
    Location,
    Read,
    Write,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Location => write!(f, "locate"),
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

#[derive(Debug, Error)]
#[error("failed to {kind} '{}': {source}", .path.display())]
pub struct ResourceAccessFailure {
    pub kind: ResourceKind,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl ResourceAccessFailure {
    pub fn new(kind: ResourceKind, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            kind,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_exited_message_includes_status() {
        let failure = ExecutionFailure::exited("false", Some(1), String::new(), "boom".into());
        assert_eq!(failure.to_string(), "'false' exited with status 1");
        assert_eq!(failure.stderr, "boom");
    }

    #[test]
    fn test_spawn_failure_names_program_in_stderr() {
        let err = io::Error::new(io::ErrorKind::NotFound, "No such file or directory");
        let failure = ExecutionFailure::spawn("no-such-prog", &err);

        assert_eq!(failure.message, "failed to run 'no-such-prog': No such file or directory");
        assert_eq!(failure.stderr, format!("{}\n", failure.message));
        assert_eq!(failure.exit_code, None);
    }

    #[test]
    fn test_signal_termination_has_no_exit_code() {
        let failure = ExecutionFailure::exited("sleep", None, String::new(), String::new());
        assert_eq!(failure.exit_code, None);
        assert!(failure.message.contains("signal"));
    }

    #[test]
    fn test_resource_failure_has_empty_output() {
        let err: CommandError = ResourceAccessFailure::new(
            ResourceKind::Location,
            "/missing",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        )
        .into();

        assert!(!err.is_execution());
        assert_eq!(err.stdout(), "");
        assert_eq!(err.stderr(), "");
        assert_eq!(err.to_string(), "failed to locate '/missing': not found");
    }

    #[test]
    fn test_execution_error_exposes_streams() {
        let err: CommandError =
            ExecutionFailure::exited("git", Some(128), "partial".into(), "fatal".into()).into();
        assert!(err.is_execution());
        assert_eq!(err.stdout(), "partial");
        assert_eq!(err.stderr(), "fatal");
    }
}
