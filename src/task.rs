//! Async task pattern for command execution.
//!
//! A task wraps a command together with its invocation so it can be handed to
//! the tokio runtime. The outcome handler runs once the child process exits.

use async_trait::async_trait;

use crate::command::ShellCommand;
use crate::executor;
use crate::invocation::Invocation;

/// Async unit of work with a display name.
#[async_trait]
pub trait Task: Send + 'static {
    /// Human-readable name for logs and status display.
    fn name(&self) -> String;

    /// Execute the task.
    async fn execute(self: Box<Self>) -> color_eyre::Result<()>;
}

/// Runs one [`ShellCommand`] on the tokio runtime.
pub struct CommandTask {
    command: Box<dyn ShellCommand + Send + Sync>,
    invocation: Invocation,
}

impl CommandTask {
    pub fn new(command: impl ShellCommand + Send + Sync + 'static, invocation: Invocation) -> Self {
        Self {
            command: Box::new(command),
            invocation,
        }
    }
}

#[async_trait]
impl Task for CommandTask {
    fn name(&self) -> String {
        let mut parts = vec![self.command.program().to_string()];
        parts.extend(self.command.command_line(self.invocation.arguments()));
        parts.join(" ")
    }

    async fn execute(self: Box<Self>) -> color_eyre::Result<()> {
        let Self {
            command,
            invocation,
        } = *self;
        executor::execute_async(command.as_ref(), invocation).await;
        Ok(())
    }
}
