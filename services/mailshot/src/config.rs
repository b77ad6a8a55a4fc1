//! Configuration types for the mailshot front-end

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Where the session token is kept between runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

/// Page behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Pause between a success message and the redirect that follows it
    #[serde(default = "default_redirect_delay", with = "humantime_serde")]
    pub redirect_delay: Duration,
    /// Directory exported reports are written to
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            redirect_delay: default_redirect_delay(),
            download_dir: default_download_dir(),
        }
    }
}

fn default_base_url() -> String {
    mailshot_api::DEFAULT_BASE_URL.to_string()
}

fn default_session_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mailshot")
        .join("session.json")
}

fn default_redirect_delay() -> Duration {
    Duration::from_secs(2)
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ConsoleError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
