//! Path resolution for config and credential files.

use std::path::PathBuf;

use tracing::debug;

use crate::config::{default_config_path, default_keyfile_path, read_config, KeyshareConfig};

/// Resolve the config file path, checking KEYSHARE_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("KEYSHARE_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load the config file, falling back to defaults when it does not exist.
pub fn load_config() -> anyhow::Result<KeyshareConfig> {
    let path = resolve_config_path()?;
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(KeyshareConfig::default());
    }
    read_config(&path)
}

/// Credentials file from config, or the default location.
pub fn resolve_keyfile_path(config: &KeyshareConfig) -> anyhow::Result<PathBuf> {
    match config.device.keyfile.as_deref() {
        Some(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => default_keyfile_path(),
    }
}

/// Service base URL, checking KEYSHARE_SERVICE_URL env var first.
pub fn resolve_service_url(config: &KeyshareConfig) -> String {
    if let Ok(value) = std::env::var("KEYSHARE_SERVICE_URL") {
        if !value.trim().is_empty() {
            return value;
        }
    }
    config.service.url.clone()
}
