mod types;

pub use types::*;

use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;

/// Load configuration from a TOML file
///
/// The result is not validated, since command-line flags may still override
/// it. Call [`validate_config`] once they have been applied.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./vidmeta.toml", "~/.config/vidmeta/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration after command-line overrides are applied.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.scan.workers == 0 {
        anyhow::bail!("Worker count cannot be 0");
    }

    if config.scan.queue_capacity() == 0 {
        anyhow::bail!("Queue capacity cannot be 0");
    }

    if config.scan.extensions.is_empty() {
        anyhow::bail!("At least one file extension must be configured");
    }

    if config.probe.timeout_secs == 0 {
        anyhow::bail!("Probe timeout cannot be 0");
    }

    for pattern in &config.scan.exclude.patterns {
        Regex::new(pattern)
            .with_context(|| format!("Invalid exclusion pattern '{}'", pattern))?;
    }

    if let Some(label) = &config.scan.volume_label {
        if label.contains(['\t', '\n', '\r']) {
            anyhow::bail!("Volume label cannot contain tabs or line breaks");
        }
    }

    Ok(())
}
