//! Application-level utilities for the Keyshare CLI.
//!
//! This module provides:
//! - Path resolution for config, keyfile and service URL
//! - Device credential lookup (flag, keychain, keyfile)
//! - The per-invocation context that owns the service and group resolver

mod context;
mod credentials;
mod resolver;

// Re-export public API
pub use context::{AppContext, GroupResolver};
pub use credentials::{clear_credentials, DeviceCredentials};
