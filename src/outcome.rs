//! Routing of an execution result to callbacks or the console.

use std::fmt;
use std::io::{self, Stderr, Stdout, Write};

use crate::error::CommandError;

pub type SuccessCallback = Box<dyn FnOnce(String) + Send + 'static>;
pub type FailureCallback = Box<dyn FnOnce(CommandError) + Send + 'static>;

/// Where the result of one execution goes.
///
/// Each side is independent: a handler with only `on_failure` still prints
/// successful output to the console. Exactly one of "callback invoked" or
/// "console printed" happens per execution.
#[derive(Default)]
pub struct OutcomeHandler {
    on_success: Option<SuccessCallback>,
    on_failure: Option<FailureCallback>,
}

impl OutcomeHandler {
    /// Handler that prints everything to the console.
    pub fn console() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_success(mut self, callback: impl FnOnce(String) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_failure(mut self, callback: impl FnOnce(CommandError) + Send + 'static) -> Self {
        self.on_failure = Some(Box::new(callback));
        self
    }

    /// Deliver a result, printing to stdout/stderr for any missing callback.
    pub fn deliver(self, result: Result<String, CommandError>, success_message: Option<&str>) {
        self.deliver_to(result, success_message, &mut ConsoleHandler::stdio());
    }

    /// Deliver a result using `console` for any missing callback.
    pub fn deliver_to<O: Write, E: Write>(
        self,
        result: Result<String, CommandError>,
        success_message: Option<&str>,
        console: &mut ConsoleHandler<O, E>,
    ) {
        match (result, self.on_success, self.on_failure) {
            (Ok(stdout), Some(callback), _) => callback(stdout),
            (Ok(stdout), None, _) => console.success(&stdout, success_message),
            (Err(err), _, Some(callback)) => callback(err),
            (Err(err), _, None) => console.failure(&err),
        }
    }
}

impl fmt::Debug for OutcomeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutcomeHandler")
            .field("on_success", &self.on_success.is_some())
            .field("on_failure", &self.on_failure.is_some())
            .finish()
    }
}

/// Print-based sink used when no callback is supplied.
pub struct ConsoleHandler<O, E> {
    out: O,
    err: E,
}

impl ConsoleHandler<Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> ConsoleHandler<O, E> {
    pub const fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Print captured stdout, then the success message on its own line.
    pub fn success(&mut self, stdout: &str, success_message: Option<&str>) {
        let _ = self.out.write_all(stdout.as_bytes());
        if let Some(message) = success_message {
            let _ = writeln!(self.out, "{message}");
        }
        let _ = self.out.flush();
    }

    /// Print captured stderr to the error stream and captured stdout to the output stream.
    pub fn failure(&mut self, error: &CommandError) {
        match error {
            CommandError::Execution(failure) => {
                let _ = self.err.write_all(failure.stderr.as_bytes());
                let _ = self.out.write_all(failure.stdout.as_bytes());
            }
            CommandError::ResourceAccess(failure) => {
                let _ = writeln!(self.err, "{failure}");
            }
        }
        let _ = self.err.flush();
        let _ = self.out.flush();
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}
