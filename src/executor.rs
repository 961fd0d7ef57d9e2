//! The one execution routine shared by every [`ShellCommand`].
//!
//! Builds `default_arguments ++ arguments`, runs the process primitive and
//! hands the result to the invocation's [`OutcomeHandler`](crate::OutcomeHandler).
//! Failures never propagate past [`execute`].

use std::path::Path;

use tracing::{debug, info, warn};

use crate::command::ShellCommand;
use crate::error::{CommandError, ResourceAccessFailure, ResourceKind};
use crate::invocation::Invocation;
use crate::process::{self, ProcessRequest, ProcessRunner, SystemRunner};

/// Execute `command` on the current thread using the system process primitive.
pub fn execute<C: ShellCommand + ?Sized>(command: &C, invocation: Invocation) {
    execute_with(&SystemRunner, command, invocation);
}

/// Execute `command` through an explicit [`ProcessRunner`].
pub fn execute_with<R, C>(runner: &R, command: &C, invocation: Invocation)
where
    R: ProcessRunner + ?Sized,
    C: ShellCommand + ?Sized,
{
    let Invocation {
        arguments,
        working_dir,
        output_file,
        handler,
    } = invocation;

    let request = build_request(command, &arguments).working_dir(working_dir);
    let result = runner
        .run(&request)
        .and_then(|stdout| write_output(output_file.as_deref(), stdout));
    log_result(&request, &result);

    handler.deliver(result, command.success_message());
}

/// Execute `command` on the tokio runtime; the handler runs after the child exits.
pub async fn execute_async<C: ShellCommand + ?Sized>(command: &C, invocation: Invocation) {
    let Invocation {
        arguments,
        working_dir,
        output_file,
        handler,
    } = invocation;

    let request = build_request(command, &arguments).working_dir(working_dir);
    let result = match process::run_async(&request).await {
        Ok(stdout) => write_output_async(output_file.as_deref(), stdout).await,
        Err(err) => Err(err),
    };
    log_result(&request, &result);

    handler.deliver(result, command.success_message());
}

/// Run `command` and return the outcome instead of dispatching it.
pub fn capture<C: ShellCommand + ?Sized>(
    command: &C,
    arguments: &[String],
) -> Result<String, CommandError> {
    let request = build_request(command, arguments);
    let result = SystemRunner.run(&request);
    log_result(&request, &result);
    result
}

fn build_request<C: ShellCommand + ?Sized>(command: &C, arguments: &[String]) -> ProcessRequest {
    debug_assert!(!command.program().is_empty(), "command program must not be empty");
    ProcessRequest::new(command.program(), command.command_line(arguments))
}

fn log_result(request: &ProcessRequest, result: &Result<String, CommandError>) {
    match result {
        Ok(stdout) => debug!(
            program = %request.program,
            stdout_len = stdout.len(),
            "Command succeeded"
        ),
        Err(err) => warn!(program = %request.program, %err, "Command failed"),
    }
}

fn write_output(path: Option<&Path>, stdout: String) -> Result<String, CommandError> {
    if let Some(path) = path {
        std::fs::write(path, &stdout)
            .map_err(|err| ResourceAccessFailure::new(ResourceKind::Write, path, err))?;
        info!(path = %path.display(), "Wrote command output");
    }
    Ok(stdout)
}

async fn write_output_async(path: Option<&Path>, stdout: String) -> Result<String, CommandError> {
    if let Some(path) = path {
        tokio::fs::write(path, &stdout)
            .await
            .map_err(|err| ResourceAccessFailure::new(ResourceKind::Write, path, err))?;
        info!(path = %path.display(), "Wrote command output");
    }
    Ok(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CustomCommand, GitCommand};
    use crate::error::ExecutionFailure;
    use std::sync::{Arc, Mutex};

    /// Records every request and answers with a canned result.
    #[derive(Default)]
    struct RecordingRunner {
        requests: Mutex<Vec<ProcessRequest>>,
        fail: bool,
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&self, request: &ProcessRequest) -> Result<String, CommandError> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                Err(ExecutionFailure::exited(&request.program, Some(1), "so far".into(), "bad".into())
                    .into())
            } else {
                Ok(request.arguments.join(" "))
            }
        }
    }

    fn slot<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, Arc<Mutex<Vec<T>>>) {
        let slot = Arc::new(Mutex::new(Vec::new()));
        (Arc::clone(&slot), slot)
    }

    #[test]
    fn test_default_arguments_precede_caller_arguments() {
        let runner = RecordingRunner::default();
        let command = CustomCommand::new("tool").default_args(["--a", "--b"]);

        execute_with(
            &runner,
            &command,
            Invocation::with_args(["x", "--a", "y"]).on_success(|_| {}),
        );

        let requests = runner.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].program, "tool");
        assert_eq!(requests[0].arguments, ["--a", "--b", "x", "--a", "y"]);
    }

    #[test]
    fn test_enum_command_is_forwarded_with_working_dir() {
        let runner = RecordingRunner::default();

        execute_with(
            &runner,
            &GitCommand::DeleteBranch,
            Invocation::with_args(["old"])
                .current_dir("/repo")
                .on_success(|_| {}),
        );

        let requests = runner.requests.lock().unwrap();
        assert_eq!(requests[0].program, "git");
        assert_eq!(requests[0].arguments, ["branch", "-d", "old"]);
        assert_eq!(requests[0].working_dir.as_deref(), Some(Path::new("/repo")));
    }

    #[test]
    fn test_failure_reaches_callback_once() {
        let runner = RecordingRunner {
            fail: true,
            ..RecordingRunner::default()
        };
        let (seen, failures) = slot();

        execute_with(
            &runner,
            &CustomCommand::new("tool"),
            Invocation::new()
                .on_success(|_| panic!("success callback must not run"))
                .on_failure(move |err| {
                    seen.lock()
                        .unwrap()
                        .push((err.stdout().to_string(), err.stderr().to_string()));
                }),
        );

        assert_eq!(
            *failures.lock().unwrap(),
            vec![("so far".to_string(), "bad".to_string())]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_echo_success_reaches_callback() {
        let (seen, outputs) = slot();

        execute(
            &CustomCommand::new("echo"),
            Invocation::with_args(["hello"]).on_success(move |stdout| seen.lock().unwrap().push(stdout)),
        );

        assert_eq!(*outputs.lock().unwrap(), vec!["hello\n".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_false_without_callbacks_does_not_panic() {
        execute(&CustomCommand::new("false"), Invocation::new());
    }

    #[cfg(unix)]
    #[test]
    fn test_repeated_execution_is_stable() {
        let command = CustomCommand::new("echo").default_args(["fixed-text"]);
        let first = capture(&command, &[]).unwrap();
        let second = capture(&command, &[]).unwrap();
        assert_eq!(first, "fixed-text\n");
        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn test_output_file_receives_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let (seen, outputs) = slot();

        execute(
            &CustomCommand::new("echo"),
            Invocation::with_args(["saved"])
                .output_file(&path)
                .on_success(move |stdout| seen.lock().unwrap().push(stdout)),
        );

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "saved\n");
        assert_eq!(*outputs.lock().unwrap(), vec!["saved\n".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unwritable_output_file_is_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let (seen, kinds) = slot();

        execute(
            &CustomCommand::new("echo"),
            Invocation::with_args(["lost"])
                .output_file(&path)
                .on_failure(move |err| {
                    if let CommandError::ResourceAccess(failure) = err {
                        seen.lock().unwrap().push(failure.kind);
                    }
                }),
        );

        assert_eq!(*kinds.lock().unwrap(), vec![ResourceKind::Write]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_async_execution_delivers_after_exit() {
        let (seen, outputs) = slot();

        execute_async(
            &CustomCommand::new("echo"),
            Invocation::with_args(["later"]).on_success(move |stdout| seen.lock().unwrap().push(stdout)),
        )
        .await;

        assert_eq!(*outputs.lock().unwrap(), vec!["later\n".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_async_missing_working_dir_skips_spawn() {
        let dir = tempfile::tempdir().unwrap();
        let (seen, kinds) = slot();

        execute_async(
            &CustomCommand::new("echo"),
            Invocation::new()
                .current_dir(dir.path().join("gone"))
                .on_failure(move |err| {
                    if let CommandError::ResourceAccess(failure) = err {
                        seen.lock().unwrap().push(failure.kind);
                    }
                }),
        )
        .await;

        assert_eq!(*kinds.lock().unwrap(), vec![ResourceKind::Location]);
    }
}
