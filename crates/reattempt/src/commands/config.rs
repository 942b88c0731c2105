//! Config commands

use anyhow::{bail, Context, Result};
use camino::Utf8Path;
use reattempt_core::ReattemptConfig;

use crate::cli::{ConfigCommands, ConfigInitArgs, ConfigShowArgs};
use crate::output;

pub fn run(cmd: ConfigCommands, config_path: Option<&Utf8Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Init(args) => init(args),
        ConfigCommands::Show(args) => show(args, config_path),
    }
}

fn init(args: ConfigInitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            args.output
        );
    }

    let content = ReattemptConfig::default_yaml()?;
    std::fs::write(&args.output, content)
        .with_context(|| format!("Failed to write {}", args.output))?;

    output::success(&format!("Created {}", args.output));
    Ok(())
}

fn show(args: ConfigShowArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = ReattemptConfig::load(config_path)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config.settings)?);
        return Ok(());
    }

    match &config.config_path {
        Some(path) => output::kv("Source", path.as_str()),
        None => output::warning("No reattempt.yaml found, showing built-in defaults"),
    }

    output::header("Defaults");
    print_settings(&config.settings.defaults);

    let mut labels: Vec<_> = config.settings.labels.iter().collect();
    labels.sort_by(|a, b| a.0.cmp(b.0));
    for (label, settings) in labels {
        output::header(label);
        print_settings(settings);
    }

    Ok(())
}

fn print_settings(settings: &reattempt_core::types::AttemptSettings) {
    output::kv("Base delay", &settings.base_delay.to_string());
    output::kv("Retries", &settings.retries.to_string());
    output::kv("Time unit", settings.time_unit.label());
}
