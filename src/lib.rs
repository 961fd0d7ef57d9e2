//! Declare external commands once and execute them through a common interface.
//!
//! The building blocks:
//! - [`ShellCommand`] - what to run and which arguments always come first
//! - [`Invocation`] - per-call arguments, working directory and outcome handler
//! - [`OutcomeHandler`] - optional callbacks, falling back to [`ConsoleHandler`]
//! - [`Task`] - async wrapper that delivers the outcome once the child exits
//!
//! ```no_run
//! use runs_shell_command::{GitCommand, Invocation, ShellCommand};
//!
//! GitCommand::CreateAndCheckoutBranch.execute(
//!     Invocation::new()
//!         .arg("feature/login")
//!         .on_failure(|err| eprintln!("could not branch: {err}")),
//! );
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod invocation;
pub mod outcome;
pub mod process;
pub mod task;

// Re-export commonly used types
pub use command::{CustomCommand, GitCommand, ShellCommand};
pub use error::{CommandError, ExecutionFailure, ResourceAccessFailure, ResourceKind};
pub use invocation::Invocation;
pub use outcome::{ConsoleHandler, OutcomeHandler};
pub use task::{CommandTask, Task};
