pub mod group;
pub mod replay;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};

use crate::cli::Cli;
use crate::config::EngineConfig;

/// Engine configuration from `--config`, or the defaults.
pub(crate) fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let Some(path) = &cli.config else { return Ok(EngineConfig::default()) };
    let text = fs::read_to_string(path)
        .with_context(|| format!("[config] failed to read {}", path.display()))?;
    EngineConfig::from_json(&text)
        .with_context(|| format!("[config] invalid configuration in {}", path.display()))
}

/// Read a JSON document from `path`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Write `value` as JSON to `output`, or to stdout.
pub(crate) fn write_json<T: Serialize>(value: &T, output: Option<&Path>, pretty: bool) -> Result<()> {
    let text = if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    match output {
        Some(path) => fs::write(path, text + "\n")
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}
