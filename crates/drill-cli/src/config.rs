use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use drill_core::DrillConfig;

#[derive(serde::Serialize, serde::Deserialize, Debug, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub drill: DrillConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub no_speech: bool,
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("degree-drill")
        .join("config.toml")
}

/// Load settings from `explicit`, or from the default location if it exists.
///
/// A missing default file yields defaults; a missing explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = config_path();
            if !path.exists() {
                return Ok(AppConfig::default());
            }
            path
        }
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

pub fn parse_config(text: &str) -> Result<AppConfig> {
    Ok(toml::from_str(text)?)
}
