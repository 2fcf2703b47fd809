use crate::rules::RenameConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-directory state directory (config, history, lock)
pub const STATE_DIR_NAME: &str = ".tidyname";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Rule values used when the command line does not set them
    #[serde(default)]
    pub rules: RenameConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DefaultsConfig {
    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Config {
    /// Load config from `.tidyname/config.toml` in the current directory, then
    /// from the user config directory, falling back to defaults.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Self::load_from_dir(&cwd)
    }

    /// Same as [`Config::load`] with an explicit working directory
    pub fn load_from_dir(working_dir: &Path) -> Result<Self> {
        let local = working_dir.join(STATE_DIR_NAME).join("config.toml");
        if local.exists() {
            return Self::load_from_path(&local);
        }

        if let Some(global) = global_config_path() {
            if global.exists() {
                return Self::load_from_path(&global);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// `<config_dir>/tidyname/config.toml`, when the platform has a config dir
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tidyname").join("config.toml"))
}
