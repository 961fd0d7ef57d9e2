//! Command declarations.
//!
//! A command declares the program to run and the arguments it always passes.
//! Execution itself lives in [`crate::executor`] and is shared by every
//! implementor through the provided methods of [`ShellCommand`].

mod custom;
mod git;

pub use custom::CustomCommand;
pub use git::{GitCommand, UnknownGitCommand};

use crate::error::CommandError;
use crate::executor;
use crate::invocation::Invocation;

/// Something that can be run as an external process.
///
/// Implementors supply [`program`](Self::program) and optionally override
/// [`default_arguments`](Self::default_arguments) and
/// [`success_message`](Self::success_message).
pub trait ShellCommand {
    /// The executable to run (the first word of the command line). Never empty.
    fn program(&self) -> &str;

    /// Arguments always passed before the caller's arguments.
    fn default_arguments(&self) -> Vec<String> {
        Vec::new()
    }

    /// Printed after a successful run when no success callback is set.
    fn success_message(&self) -> Option<&str> {
        None
    }

    /// The full argument list for a call with `extra` arguments.
    fn command_line(&self, extra: &[String]) -> Vec<String> {
        let mut arguments = self.default_arguments();
        arguments.extend_from_slice(extra);
        arguments
    }

    /// Run the command, routing the outcome to the invocation's handler.
    fn execute(&self, invocation: Invocation) {
        executor::execute(self, invocation);
    }

    /// Run the command in the current directory and return the captured stdout.
    fn capture(&self, arguments: &[String]) -> Result<String, CommandError> {
        executor::capture(self, arguments)
    }
}

impl<T: ShellCommand + ?Sized> ShellCommand for Box<T> {
    fn program(&self) -> &str {
        (**self).program()
    }

    fn default_arguments(&self) -> Vec<String> {
        (**self).default_arguments()
    }

    fn success_message(&self) -> Option<&str> {
        (**self).success_message()
    }
}
