use super::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML config: {}", path.as_ref().display()))?;

    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to the built-in defaults.
/// A file that exists but fails to parse is still an error.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
    if path.as_ref().exists() {
        let config = load_config(&path)?;
        log::info!("Loaded configuration from: {}", path.as_ref().display());
        Ok(config)
    } else {
        log::warn!(
            "Configuration file '{}' not found, using default configuration",
            path.as_ref().display()
        );
        Ok(Config::default())
    }
}
