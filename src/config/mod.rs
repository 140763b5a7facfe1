// Configuration management for Setlist
// Handles loading/saving settings, with sensible defaults when config is missing

use anyhow::Result;
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of the daily log files; the appender adds the date
pub const LOG_FILE_NAME: &str = "setlist.log";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playlist: PlaylistConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistConfig {
    pub name: String,
    pub shuffle_seed: Option<u64>, // fixed seed = reproducible shuffles
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub filter: String, // RUST_LOG still wins when set
}

impl Default for Config {
    fn default() -> Self {
        Self {
            playlist: PlaylistConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            name: "My Mix".to_string(),
            shuffle_seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            filter: "info,setlist=debug".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Filter used when RUST_LOG is unset. Dev mode turns everything up to debug.
    pub fn directive(&self, dev: bool) -> &str {
        if dev {
            "debug"
        } else {
            &self.filter
        }
    }
}

impl Config {
    /// Load from the user config dir, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("setlist");

        Ok(config_dir.join("config.toml"))
    }
}
