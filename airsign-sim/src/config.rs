//! TOML configuration loader

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use airsign_core::SignConfig;

/// Load and validate the configuration at `path`
///
/// A missing file yields the defaults.
pub fn load(path: &Path) -> Result<SignConfig> {
    if !path.exists() {
        warn!("{} not found, using default configuration", path.display());
        return Ok(SignConfig::default());
    }
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config = parse(&text).with_context(|| format!("in {}", path.display()))?;
    info!("loaded configuration from {}", path.display());
    Ok(config)
}

/// Parse and validate configuration text
pub fn parse(text: &str) -> Result<SignConfig> {
    let config: SignConfig = toml::from_str(text).context("invalid TOML")?;
    config.validate()?;
    Ok(config)
}
