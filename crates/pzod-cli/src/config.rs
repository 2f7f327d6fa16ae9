//! Generator options from a config file and `--set` overrides.
//!
//! The file holds the same flat key/value map as a Prisma `generator`
//! block. `.json` files are read as JSON, everything else as YAML:
//!
//! ```yaml
//! relationModel: default
//! modelSuffix: Schema
//! useCoerce: true
//! imports: ../src/zod-utils
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use pzod_core::{ConfigValue, RawConfig};

/// Read a generator option map from `path`.
pub fn load_raw_config(path: &Path) -> Result<RawConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let raw = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config JSON: {}", path.display()))?
    } else if content.trim().is_empty() {
        RawConfig::new()
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config YAML: {}", path.display()))?
    };
    Ok(raw)
}

/// Parse one `KEY=VALUE` override. Used as a clap value parser.
pub fn parse_override(input: &str) -> Result<(String, String), String> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{input}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing option name in `{input}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Layer overrides on top of a base map. Later overrides win.
pub fn apply_overrides(mut raw: RawConfig, overrides: &[(String, String)]) -> RawConfig {
    for (key, value) in overrides {
        raw.insert(key.clone(), ConfigValue::from(value.as_str()));
    }
    raw
}
