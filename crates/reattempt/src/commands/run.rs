//! Run command

use anyhow::{Context, Result};
use camino::Utf8Path;
use reattempt_core::retry::{
    AttemptError, ConsoleObserver, Retry, RetryError, RetryObserver, TracingObserver,
};
use reattempt_core::types::AttemptSettings;
use reattempt_core::ReattemptConfig;
use std::io;
use thiserror::Error;
use tokio::process::Command;

use crate::cli::RunArgs;
use crate::output;

/// Environment variable exposing the number of completed attempts to the child
pub const ATTEMPT_ENV: &str = "REATTEMPT_ATTEMPT";

/// Why a single run of the child process failed
#[derive(Debug, Error)]
pub enum CommandFailure {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with status {code}")]
    Exit { program: String, code: i32 },

    #[error("{program} was terminated by a signal")]
    Signal { program: String },
}

pub async fn run(args: RunArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = ReattemptConfig::load(config_path)?;

    let (program, program_args) = args
        .command
        .split_first()
        .context("no command given")?;
    let label = args.label.clone().unwrap_or_else(|| args.command.join(" "));
    let settings = resolve_settings(config.settings_for(&label), &args);

    tracing::debug!(
        label = %label,
        base_delay = settings.base_delay,
        retries = settings.retries,
        unit = %settings.time_unit,
        "resolved retry settings"
    );

    let observer: Box<dyn RetryObserver> = if args.tracing {
        Box::new(TracingObserver::with_unit(settings.time_unit))
    } else {
        Box::new(ConsoleObserver::with_unit(settings.time_unit))
    };
    let retry = Retry::from_settings(&label, &settings).with_observer(observer);

    if settings.retries == 0 {
        output::info(&format!("Running {} once, retries are disabled", label));
    }

    match execute(&retry, program, program_args, &args.abort_on).await {
        Ok(()) => {
            output::success(&format!("{} succeeded", label));
            Ok(())
        }
        Err(err) => {
            output::error(&err.to_string());
            std::process::exit(exit_code(&err));
        }
    }
}

/// Exit status for a failed session: the child's own code when it exited
/// normally, 1 otherwise
pub fn exit_code(err: &RetryError<CommandFailure>) -> i32 {
    match err.source_ref() {
        Some(CommandFailure::Exit { code, .. }) if *code != 0 => *code,
        _ => 1,
    }
}

/// Apply command-line overrides on top of the configured settings
pub fn resolve_settings(configured: &AttemptSettings, args: &RunArgs) -> AttemptSettings {
    AttemptSettings {
        base_delay: args.delay.unwrap_or(configured.base_delay),
        retries: args.retries.unwrap_or(configured.retries),
        time_unit: args.unit.map(Into::into).unwrap_or(configured.time_unit),
    }
}

/// Run the program under the retry engine
pub async fn execute<O: RetryObserver>(
    retry: &Retry<O>,
    program: &str,
    program_args: &[String],
    abort_on: &[i32],
) -> std::result::Result<(), RetryError<CommandFailure>> {
    retry
        .attempt_async_with_state(|state| {
            let mut command = Command::new(program);
            command
                .args(program_args)
                .env(ATTEMPT_ENV, state.current_try().to_string());

            async move {
                match command.status().await {
                    Ok(status) => classify(program, status.code(), abort_on),
                    Err(source) => Err(spawn_failure(program, source)),
                }
            }
        })
        .await
}

/// A program that cannot be found will not appear on a later attempt
fn spawn_failure(program: &str, source: io::Error) -> AttemptError<CommandFailure> {
    let permanent = matches!(
        source.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
    );
    let failure = CommandFailure::Spawn {
        program: program.to_string(),
        source,
    };
    if permanent {
        AttemptError::abort(failure)
    } else {
        AttemptError::transient(failure)
    }
}

/// Map an exit code onto the retry outcome
pub fn classify(
    program: &str,
    code: Option<i32>,
    abort_on: &[i32],
) -> std::result::Result<(), AttemptError<CommandFailure>> {
    match code {
        Some(0) => Ok(()),
        Some(code) if abort_on.contains(&code) => Err(AttemptError::abort(CommandFailure::Exit {
            program: program.to_string(),
            code,
        })),
        Some(code) => Err(AttemptError::transient(CommandFailure::Exit {
            program: program.to_string(),
            code,
        })),
        None => Err(AttemptError::transient(CommandFailure::Signal {
            program: program.to_string(),
        })),
    }
}
