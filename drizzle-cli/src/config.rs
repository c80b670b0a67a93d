//! Configuration file loading.
//!
//! A configuration file is the [`System`] data model itself, in JSON or
//! YAML, selected by file extension. An unknown extension is fatal: the
//! replayer never runs with a configuration it could not fully parse.

use std::path::Path;

use anyhow::{bail, Context, Result};
use drizzle_core::System;

/// Load a system configuration from `path`, selecting the parser by file
/// extension (`.json`, `.yaml`, `.yml`).
pub fn load(path: &Path) -> Result<System> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let system = match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?,
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?,
        other => bail!(
            "unknown config file extension '{other}' (expected .json, .yaml, or .yml): {}",
            path.display()
        ),
    };

    Ok(system)
}
