use std::fmt;
use std::str::FromStr;

use crate::command::ShellCommand;

/// The closed set of git commands known by name.
///
/// Each variant maps to exactly one fixed program and argument list; branch
/// names, messages and remotes are passed as invocation arguments.
///
/// # Example
///
/// ```
/// use runs_shell_command::{GitCommand, ShellCommand};
///
/// let command: GitCommand = "create-and-checkout-branch".parse().unwrap();
/// assert_eq!(command.command_line(&["feature".into()]), ["checkout", "-b", "feature"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitCommand {
    Init,
    Status,
    AddAll,
    Commit,
    Checkout,
    CreateAndCheckoutBranch,
    DeleteBranch,
    CurrentBranch,
    Fetch,
    Pull,
    Push,
    Stash,
}

impl GitCommand {
    pub const ALL: [Self; 12] = [
        Self::Init,
        Self::Status,
        Self::AddAll,
        Self::Commit,
        Self::Checkout,
        Self::CreateAndCheckoutBranch,
        Self::DeleteBranch,
        Self::CurrentBranch,
        Self::Fetch,
        Self::Pull,
        Self::Push,
        Self::Stash,
    ];

    /// Stable kebab-case name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Status => "status",
            Self::AddAll => "add-all",
            Self::Commit => "commit",
            Self::Checkout => "checkout",
            Self::CreateAndCheckoutBranch => "create-and-checkout-branch",
            Self::DeleteBranch => "delete-branch",
            Self::CurrentBranch => "current-branch",
            Self::Fetch => "fetch",
            Self::Pull => "pull",
            Self::Push => "push",
            Self::Stash => "stash",
        }
    }

    const fn arguments(self) -> &'static [&'static str] {
        match self {
            Self::Init => &["init"],
            Self::Status => &["status"],
            Self::AddAll => &["add", "."],
            Self::Commit => &["commit", "-m"],
            Self::Checkout => &["checkout"],
            Self::CreateAndCheckoutBranch => &["checkout", "-b"],
            Self::DeleteBranch => &["branch", "-d"],
            Self::CurrentBranch => &["rev-parse", "--abbrev-ref", "HEAD"],
            Self::Fetch => &["fetch"],
            Self::Pull => &["pull"],
            Self::Push => &["push"],
            Self::Stash => &["stash"],
        }
    }
}

impl ShellCommand for GitCommand {
    fn program(&self) -> &str {
        "git"
    }

    fn default_arguments(&self) -> Vec<String> {
        self.arguments().iter().map(ToString::to_string).collect()
    }

    fn success_message(&self) -> Option<&str> {
        match self {
            Self::Init => Some("Initialized repository"),
            Self::CreateAndCheckoutBranch => Some("Created and checked out branch"),
            Self::DeleteBranch => Some("Deleted branch"),
            _ => None,
        }
    }
}

impl fmt::Display for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown git command '{0}'")]
pub struct UnknownGitCommand(pub String);

impl FromStr for GitCommand {
    type Err = UnknownGitCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or_else(|| UnknownGitCommand(s.to_string()))
    }
}
