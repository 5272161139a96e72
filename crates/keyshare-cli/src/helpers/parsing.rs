//! Validation of user-typed identifiers at the argument boundary.
//!
//! These functions are used as clap value parsers, so they return `String`
//! errors that clap prints verbatim.

use keyshare_core::service::{DeviceId, UserId};
use keyshare_core::{GroupName, GroupReference, GROUP_ID_PREFIX};

const MAX_LOCAL_PART: usize = 64;
const MAX_DOMAIN: usize = 255;

/// Parse one group reference. Bare names may not contain `,` or `^`; the
/// escaped form `id^<id>` needs a non-empty ID without further `^`.
pub fn parse_group_reference(raw: &str) -> Result<GroupReference, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Group reference cannot be empty.".to_string());
    }
    if raw.contains(',') {
        return Err(format!(
            "Group reference '{}' contains ',' which is not allowed.",
            raw
        ));
    }
    match raw.strip_prefix(GROUP_ID_PREFIX) {
        Some("") => Err(format!("Malformed group ID '{}': no ID after '{}'.", raw, GROUP_ID_PREFIX)),
        Some(id) if id.contains('^') => Err(format!("Malformed group ID '{}'.", raw)),
        Some(_) => Ok(GroupReference::parse(raw)),
        None if raw.contains('^') => Err(format!(
            "Group name '{}' contains '^'. Use '{}<id>' to refer to a group by ID.",
            raw, GROUP_ID_PREFIX
        )),
        None => Ok(GroupReference::parse(raw)),
    }
}

/// Names for new or renamed groups.
pub fn parse_group_name(raw: &str) -> Result<GroupName, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("Group name cannot be empty.".to_string());
    }
    if name.contains(',') || name.contains('^') {
        return Err(format!(
            "Group name '{}' cannot contain commas or carets.",
            name
        ));
    }
    Ok(GroupName::new(name))
}

/// Email-shaped user identifiers.
pub fn parse_user_id(raw: &str) -> Result<UserId, String> {
    let raw = raw.trim();
    if is_valid_email(raw) {
        Ok(UserId::new(raw))
    } else {
        Err(format!("'{}' is not a valid user email address.", raw))
    }
}

fn is_valid_email(value: &str) -> bool {
    if !value.is_ascii() || value.chars().any(|c| c.is_whitespace() || "%[]()<>\\\"".contains(c)) {
        return false;
    }
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > MAX_LOCAL_PART || local.contains('@') {
        return false;
    }
    if domain.is_empty() || domain.len() > MAX_DOMAIN {
        return false;
    }
    domain.split('.').all(is_valid_label) && domain.contains('.')
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !label.starts_with('-')
        && !label.ends_with('-')
}

/// Device IDs arrive as free text so one bad value fails only its own item.
pub fn parse_device_id(raw: &str) -> Result<DeviceId, String> {
    raw.trim()
        .parse::<u64>()
        .map(DeviceId)
        .map_err(|_| format!("Expected a numerical device ID but got '{}' instead.", raw))
}
