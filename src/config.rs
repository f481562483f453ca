//! Application configuration management.
//!
//! Configuration is stored at `~/.config/nestlog/config.json` and may be
//! overridden per-run with `NESTLOG_WEBHOOK_URL` / `NESTLOG_ASSET_ORIGIN`
//! environment variables (a `.env` file is honored at startup).

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "nestlog";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Webhook endpoint that receives submitted entries.
    pub webhook_url: Option<String>,
    /// Origin serving the tracker's static assets, mirrored for offline use.
    pub asset_origin: Option<String>,
}

impl Config {
    /// Load the config file if present, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("NESTLOG_WEBHOOK_URL") {
            config.webhook_url = Some(url);
        }
        if let Ok(origin) = std::env::var("NESTLOG_ASSET_ORIGIN") {
            config.asset_origin = Some(origin);
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Write a starter config file on first run so the user has something to
    /// fill in. Existing files are left alone.
    pub fn ensure_config_file(&self) -> Result<()> {
        if !Self::config_path()?.exists() {
            self.save()?;
        }
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::cache_dir()?.join("logs"))
    }
}
