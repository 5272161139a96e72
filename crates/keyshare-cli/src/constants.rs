//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success (also used when the user backs out of a prompt)
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (credentials, group, file).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (missing or rejected device credentials).
    pub const AUTH_FAILED: i32 = 5;
}

/// Keychain service name for stored device credentials.
pub const KEYCHAIN_SERVICE: &str = "keyshare";

/// Service endpoint used when neither config nor env override it.
pub const DEFAULT_SERVICE_URL: &str = "https://api.keyshare.dev/api/1/";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Extension appended to encrypted output files.
pub const ENCRYPTED_EXTENSION: &str = "iron";

/// `-o` value that sends output to stdout.
pub const STDOUT_MARKER: &str = "-";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "KEYSHARE_LOG";
