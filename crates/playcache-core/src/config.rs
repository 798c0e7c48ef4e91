//! Application configuration management.
//!
//! The config holds the content service coordinates (URL and anonymous key)
//! so they survive between runs. Both can also be supplied through the
//! `PLAYCACHE_SERVICE_URL` / `PLAYCACHE_SERVICE_KEY` environment variables,
//! which take precedence over the file.
//!
//! Configuration is stored at `~/.config/playcache/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "playcache";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment override for the content service URL
pub const SERVICE_URL_ENV: &str = "PLAYCACHE_SERVICE_URL";

/// Environment override for the content service key
pub const SERVICE_KEY_ENV: &str = "PLAYCACHE_SERVICE_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub service_url: Option<String>,
    pub service_key: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
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

    pub fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir =
            dirs::cache_dir().ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Service URL with the environment override applied.
    pub fn resolved_service_url(&self) -> Option<String> {
        std::env::var(SERVICE_URL_ENV)
            .ok()
            .or_else(|| self.service_url.clone())
    }

    /// Service key with the environment override applied.
    pub fn resolved_service_key(&self) -> Option<String> {
        std::env::var(SERVICE_KEY_ENV)
            .ok()
            .or_else(|| self.service_key.clone())
    }
}
