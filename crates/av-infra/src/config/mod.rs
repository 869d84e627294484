//! # Configuration Loader
//!
//! Reads the TOML configuration file and maps it onto [`AppConfig`]. Pure
//! data loading: whatever the file says is accepted.

use anyhow::Context;
use std::path::PathBuf;

use av_core::config::AppConfig;

const APP_DIR: &str = "addrverify";
const CONFIG_FILE: &str = "config.toml";

/// Platform config location, e.g. `~/.config/addrverify/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}
