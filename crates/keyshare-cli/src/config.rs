use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SERVICE_URL, DEFAULT_TIMEOUT_SECONDS};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyshareConfig {
    #[serde(default)]
    pub service: ServiceSection,
    #[serde(default)]
    pub device: DeviceSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceSection {
    #[serde(default = "default_service_url")]
    pub url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceSection {
    /// Credentials file; defaults to `device.json` next to the config.
    pub keyfile: Option<String>,
    #[serde(default = "default_keychain")]
    pub keychain: bool,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            url: default_service_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for DeviceSection {
    fn default() -> Self {
        Self {
            keyfile: None,
            keychain: default_keychain(),
        }
    }
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_keychain() -> bool {
    true
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_keyfile_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("device.json"))
}

/// Marker file naming the account whose credentials live in the keychain.
pub fn login_marker_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("login"))
}

pub fn read_config(path: &Path) -> anyhow::Result<KeyshareConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("keyshare"));
        }
    }
    Ok(home_dir()?.join(".config").join("keyshare"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
