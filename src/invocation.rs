use std::path::{Path, PathBuf};

use crate::error::CommandError;
use crate::outcome::OutcomeHandler;

/// Per-call inputs for executing a [`ShellCommand`](crate::ShellCommand).
///
/// Arguments are appended after the command's default arguments.
#[derive(Debug, Default)]
pub struct Invocation {
    pub(crate) arguments: Vec<String>,
    pub(crate) working_dir: Option<PathBuf>,
    pub(crate) output_file: Option<PathBuf>,
    pub(crate) handler: OutcomeHandler,
}

impl Invocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invocation with the given extra arguments and console output.
    pub fn with_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new().args(args)
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the process in `dir` instead of the current directory.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Also write captured stdout to `path` after a successful run.
    #[must_use]
    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn handler(mut self, handler: OutcomeHandler) -> Self {
        self.handler = handler;
        self
    }

    #[must_use]
    pub fn on_success(mut self, callback: impl FnOnce(String) + Send + 'static) -> Self {
        self.handler = self.handler.on_success(callback);
        self
    }

    #[must_use]
    pub fn on_failure(mut self, callback: impl FnOnce(CommandError) + Send + 'static) -> Self {
        self.handler = self.handler.on_failure(callback);
        self
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arguments_keep_insertion_order() {
        let invocation = Invocation::new().arg("a").args(["b", "c"]).arg("d");
        assert_eq!(invocation.arguments(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_handler_replaces_console_default() {
        let (tx, rx) = std::sync::mpsc::channel();
        let invocation = Invocation::with_args(["x"])
            .handler(OutcomeHandler::console().on_success(move |stdout| tx.send(stdout).unwrap()));

        let mut console = crate::ConsoleHandler::new(Vec::<u8>::new(), Vec::<u8>::new());
        invocation
            .handler
            .deliver_to(Ok("done\n".into()), Some("ignored"), &mut console);

        assert_eq!(rx.try_recv().unwrap(), "done\n");
        let (out, err) = console.into_inner();
        assert!(out.is_empty() && err.is_empty());
    }

    #[test]
    fn test_defaults_to_current_directory() {
        let invocation = Invocation::with_args(["x"]);
        assert!(invocation.working_dir().is_none());
        assert!(invocation.output_file.is_none());
    }
}
