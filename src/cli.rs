use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use runs_shell_command::GitCommand;

#[derive(Parser, Debug)]
#[command(name = "runsh", version, about = "Run declared shell commands")]
pub struct Args {
    /// Path to the config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory to run the command in
    #[arg(short = 'C', long = "dir", global = true)]
    pub working_dir: Option<PathBuf>,

    /// Write captured stdout to this file as well
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Run an arbitrary program
    Exec {
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        program: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run a known git command (e.g. "create-and-checkout-branch")
    Git {
        #[arg(value_parser = parse_git_command)]
        action: GitCommand,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run a command alias from the config file
    Run {
        alias: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Manage command aliases
    #[command(subcommand)]
    Alias(AliasCmd),
}

#[derive(Subcommand, Debug)]
pub enum AliasCmd {
    /// List configured aliases and known git commands
    List,
    /// Add or replace an alias
    Add {
        name: String,
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        program: String,
        /// Printed after a successful run
        #[arg(long)]
        success_message: Option<String>,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Remove an alias
    Remove { name: String },
}

fn parse_git_command(s: &str) -> Result<GitCommand, String> {
    s.parse().map_err(|err| {
        let known: Vec<_> = GitCommand::ALL.iter().map(|c| c.name()).collect();
        format!("{err} (known: {})", known.join(", "))
    })
}
