//! String formatting utilities for UI rendering.

use chrono::{DateTime, Utc};

/// Timestamps: short local-free form for humans, RFC 3339 for scripts.
pub fn format_datetime(dt: &DateTime<Utc>, pretty: bool) -> String {
    if pretty {
        dt.format("%Y-%m-%d %H:%M UTC").to_string()
    } else {
        dt.to_rfc3339()
    }
}

/// Membership flags in tables.
pub fn yes_no(value: bool, unicode: bool) -> &'static str {
    match (value, unicode) {
        (true, true) => "\u{2713}",
        (false, true) => "\u{2717}",
        (true, false) => "yes",
        (false, false) => "no",
    }
}
