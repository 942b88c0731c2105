//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use reattempt_core::types::TimeUnit;

/// reattempt - run a command until it succeeds
#[derive(Parser, Debug)]
#[command(name = "reattempt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to reattempt.yaml config file
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a command, retrying with exponential backoff
    Run(RunArgs),

    /// Print the delays a retry session would wait
    Backoff(BackoffArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Show version information
    Version(VersionArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Label shown in retry messages and used to look up settings
    #[arg(short, long)]
    pub label: Option<String>,

    /// Base delay before the first retry (overrides config)
    #[arg(short, long, value_parser = parse_delay)]
    pub delay: Option<f64>,

    /// Retries after the first attempt (overrides config)
    #[arg(short, long)]
    pub retries: Option<u32>,

    /// Unit of the delays (overrides config)
    #[arg(short, long, value_enum)]
    pub unit: Option<UnitArg>,

    /// Exit codes that stop retrying immediately
    #[arg(long = "abort-on", value_name = "CODE")]
    pub abort_on: Vec<i32>,

    /// Report progress through the log instead of plain console lines
    #[arg(long)]
    pub tracing: bool,

    /// Program and arguments to run
    #[arg(required = true, last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

#[derive(Args, Debug)]
pub struct BackoffArgs {
    /// Base delay
    #[arg(short, long, default_value_t = 5.0, value_parser = parse_delay)]
    pub delay: f64,

    /// Number of retries to show
    #[arg(short, long, default_value_t = 5)]
    pub retries: u32,

    /// Unit of the delays
    #[arg(short, long, value_enum, default_value = "seconds")]
    pub unit: UnitArg,
}

// Config commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a reattempt.yaml with the built-in defaults
    Init(ConfigInitArgs),

    /// Show resolved configuration
    Show(ConfigShowArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "reattempt.yaml")]
    pub output: Utf8PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Delay unit accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitArg {
    #[value(alias = "s")]
    Seconds,
    #[value(alias = "ms")]
    Milliseconds,
}

impl From<UnitArg> for TimeUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Seconds => TimeUnit::Seconds,
            UnitArg::Milliseconds => TimeUnit::Milliseconds,
        }
    }
}

fn parse_delay(value: &str) -> Result<f64, String> {
    let delay: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if !delay.is_finite() || delay < 0.0 {
        return Err(format!("delay must be a non-negative number, got {}", value));
    }
    Ok(delay)
}
