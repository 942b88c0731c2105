//! Version command

use anyhow::Result;
use serde::Serialize;

use crate::cli::VersionArgs;
use crate::output;

/// Build information reported by `reattempt version`
#[derive(Debug, Serialize)]
pub struct VersionInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub core_version: &'static str,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            core_version: reattempt_core::VERSION,
        }
    }
}

pub fn run(args: VersionArgs) -> Result<()> {
    let info = VersionInfo::current();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{} {}", info.name, info.version);
        output::kv("Core", info.core_version);
    }

    Ok(())
}
