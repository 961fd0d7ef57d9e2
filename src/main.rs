use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use runs_shell_command::config::{self, AppConfig};
use runs_shell_command::{
    CommandError, CommandTask, ConsoleHandler, CustomCommand, GitCommand, Invocation, ShellCommand,
    Task,
};
use serde_json::json;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{AliasCmd, Args, Cmd};

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let guard = initialize_logging()?;
    info!("Starting runsh");

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config::load_from(path)?,
        None => config::load()?,
    };

    let succeeded = match args.command {
        Cmd::Exec {
            ref program,
            args: ref extra,
        } => run(CustomCommand::new(program.clone()), extra, &args, &config).await?,
        Cmd::Git {
            action,
            args: ref extra,
        } => run(action, extra, &args, &config).await?,
        Cmd::Run {
            ref alias,
            args: ref extra,
        } => {
            let command = resolve_alias(&config, alias)?;
            run(command, extra, &args, &config).await?
        }
        Cmd::Alias(ref cmd) => {
            manage_aliases(cmd, &mut config, args.config.as_deref())?;
            true
        }
    };

    if !succeeded {
        drop(guard);
        std::process::exit(1);
    }
    Ok(())
}

/// Run one command to completion, reporting its outcome on the console.
async fn run(
    command: impl ShellCommand + Send + Sync + 'static,
    extra: &[String],
    args: &Args,
    config: &AppConfig,
) -> Result<bool> {
    let failed = Arc::new(Mutex::new(false));
    let json = args.json;

    let mut invocation = Invocation::with_args(extra.iter().cloned());
    if let Some(dir) = args.working_dir.as_ref().or(config.working_dir.as_ref()) {
        invocation = invocation.current_dir(dir);
    }
    if let Some(path) = &args.output {
        invocation = invocation.output_file(path);
    }

    let flag = Arc::clone(&failed);
    let success_message = command.success_message().map(ToString::to_string);
    let invocation = invocation
        .on_success(move |stdout| {
            if json {
                println!("{}", json!({ "status": "success", "stdout": stdout }));
            } else {
                ConsoleHandler::stdio().success(&stdout, success_message.as_deref());
            }
        })
        .on_failure(move |err| {
            if let Ok(mut failed) = flag.lock() {
                *failed = true;
            }
            if json {
                println!("{}", failure_report(&err));
            } else {
                ConsoleHandler::stdio().failure(&err);
            }
        });

    let task: Box<dyn Task> = Box::new(CommandTask::new(command, invocation));
    info!(task = %task.name(), "Running command");
    task.execute().await?;

    let failed = *failed.lock().map_err(|e| eyre!("Failed to read outcome: {e}"))?;
    Ok(!failed)
}

fn failure_report(err: &CommandError) -> serde_json::Value {
    match err {
        CommandError::Execution(failure) => json!({
            "status": "failure",
            "error": failure.message,
            "exit_code": failure.exit_code,
            "stdout": failure.stdout,
            "stderr": failure.stderr,
        }),
        CommandError::ResourceAccess(failure) => json!({
            "status": "failure",
            "error": failure.to_string(),
            "resource": failure.kind,
            "path": failure.path,
        }),
    }
}

/// Look up an alias, rejecting definitions without a program.
fn resolve_alias(config: &AppConfig, name: &str) -> Result<CustomCommand> {
    let command = config
        .alias(name)
        .ok_or_else(|| eyre!("no alias named '{name}'"))?;
    if command.program.is_empty() {
        return Err(eyre!("alias '{name}' has an empty program"));
    }
    Ok(command.clone())
}

fn manage_aliases(cmd: &AliasCmd, config: &mut AppConfig, path: Option<&Path>) -> Result<()> {
    match cmd {
        AliasCmd::List => {
            for (name, command) in &config.aliases {
                let line = std::iter::once(command.program.clone())
                    .chain(command.default_arguments.iter().cloned())
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("{name}\t{line}");
            }
            for git in GitCommand::ALL {
                println!("git {git}\tgit {}", git.default_arguments().join(" "));
            }
            return Ok(());
        }
        AliasCmd::Add {
            name,
            program,
            success_message,
            args,
        } => {
            let mut command = CustomCommand::new(program.clone()).default_args(args.iter().cloned());
            if let Some(message) = success_message {
                command = command.with_success_message(message.clone());
            }
            if config.set_alias(name.clone(), command).is_some() {
                info!(alias = %name, "Replaced alias");
            }
        }
        AliasCmd::Remove { name } => {
            config
                .remove_alias(name)
                .ok_or_else(|| eyre!("no alias named '{name}'"))?;
        }
    }

    match path {
        Some(path) => config::save_to(config, path),
        None => config::save(config),
    }
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || PathBuf::from("logs"),
        |path| path.join("runsh").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "runsh.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
