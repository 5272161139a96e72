//! Device credentials: `--keyfile`, then the OS keychain, then the default keyfile.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::config::{login_marker_path, KeyshareConfig};
use crate::constants::KEYCHAIN_SERVICE;
use crate::errors::CliError;

use super::resolver::resolve_keyfile_path;

/// Identity of this device with the key service.
#[derive(Clone, Serialize, Deserialize)]
pub struct DeviceCredentials {
    pub account_id: String,
    pub segment_id: u64,
    pub device_id: u64,
    pub token: String,
}

impl fmt::Debug for DeviceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceCredentials")
            .field("account_id", &self.account_id)
            .field("segment_id", &self.segment_id)
            .field("device_id", &self.device_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Drop for DeviceCredentials {
    fn drop(&mut self) {
        self.token.zeroize();
    }
}

fn no_credentials() -> CliError {
    CliError::not_found(
        "No device credentials found.",
        "Hint: Log in on this device first, or pass --keyfile <path>.",
    )
}

/// Find credentials for this device.
pub fn load_credentials(
    keyfile_override: Option<&Path>,
    config: &KeyshareConfig,
) -> anyhow::Result<DeviceCredentials> {
    if let Some(path) = keyfile_override {
        if !path.is_file() {
            return Err(CliError::not_found(
                format!("No keyfile found at {}", path.display()),
                "Hint: Check the --keyfile path.",
            )
            .into());
        }
        return read_keyfile(path);
    }

    if config.device.keychain {
        if let Some(account) = logged_in_account()? {
            match keychain_get(&account) {
                Ok(Some(json)) => {
                    debug!(account = %account, "using keychain credentials");
                    return parse_credentials(&json, "keychain");
                }
                Ok(None) => debug!(account = %account, "no keychain entry"),
                Err(err) => warn!(error = %err, "keychain unavailable, trying keyfile"),
            }
        }
    }

    let keyfile = resolve_keyfile_path(config)?;
    if keyfile.is_file() {
        debug!(path = %keyfile.display(), "using keyfile credentials");
        return read_keyfile(&keyfile);
    }

    Err(no_credentials().into())
}

/// Remove every local trace of this device's credentials.
pub fn clear_credentials(config: &KeyshareConfig) -> anyhow::Result<()> {
    if let Some(account) = logged_in_account()? {
        if let Err(err) = keychain_clear(&account) {
            warn!(error = %err, "failed to clear keychain entry");
        }
    }

    let marker = login_marker_path()?;
    remove_if_exists(&marker)?;
    let keyfile = resolve_keyfile_path(config)?;
    remove_if_exists(&keyfile)?;
    Ok(())
}

fn remove_if_exists(path: &Path) -> anyhow::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(anyhow::anyhow!(
            "Failed to remove {}: {}",
            path.display(),
            err
        )),
    }
}

fn logged_in_account() -> anyhow::Result<Option<String>> {
    let marker = login_marker_path()?;
    match std::fs::read_to_string(&marker) {
        Ok(contents) => {
            let account = contents.trim().to_string();
            Ok((!account.is_empty()).then_some(account))
        }
        Err(_) => Ok(None),
    }
}

fn read_keyfile(path: &Path) -> anyhow::Result<DeviceCredentials> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read keyfile {}: {}", path.display(), e))?;
    parse_credentials(&contents, &path.display().to_string())
}

fn parse_credentials(json: &str, source: &str) -> anyhow::Result<DeviceCredentials> {
    serde_json::from_str(json).map_err(|e| {
        anyhow::Error::from(CliError::auth_failed_with_hint(
            format!("Couldn't parse device credentials from {}: {}", source, e),
            "Hint: Log in again to replace the stored credentials.",
        ))
    })
}

fn keychain_get(account: &str) -> anyhow::Result<Option<String>> {
    let entry = keychain_entry(account)?;
    match entry.get_password() {
        Ok(value) => Ok(Some(value)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(err) => Err(anyhow::anyhow!("Keychain read failed: {}", err)),
    }
}

fn keychain_clear(account: &str) -> anyhow::Result<()> {
    let entry = keychain_entry(account)?;
    match entry.delete_password() {
        Ok(()) => Ok(()),
        Err(keyring::Error::NoEntry) => Ok(()),
        Err(err) => Err(anyhow::anyhow!("Keychain delete failed: {}", err)),
    }
}

fn keychain_entry(account: &str) -> anyhow::Result<keyring::Entry> {
    keyring::Entry::new(KEYCHAIN_SERVICE, account)
        .map_err(|e| anyhow::anyhow!("Keychain entry failed: {}", e))
}
