//! Error types for Keyshare core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps them to
//! exit codes and user-facing messages.

use thiserror::Error;

/// Result type alias for Keyshare operations.
pub type Result<T> = std::result::Result<T, KeyshareError>;

/// Core error type for Keyshare operations.
#[derive(Debug, Error)]
pub enum KeyshareError {
    /// The one-time group directory fetch failed. The cache stays unpopulated.
    #[error("Unable to make request to lookup group information: {0}")]
    DirectoryUnavailable(String),

    /// Resolving a bare reference needed the directory and it could not be loaded.
    #[error("Unable to make request for group '{reference}': {source}")]
    ReferenceLookupFailed {
        reference: String,
        #[source]
        source: Box<KeyshareError>,
    },

    /// A bare reference matched no group in the directory.
    #[error("Group '{0}' doesn't exist or couldn't be retrieved.")]
    UnknownReference(String),

    /// A single remote operation failed.
    #[error("{0}")]
    ItemOperationFailed(String),

    /// The interactive input stream closed before a choice was made.
    #[error("Cancelled by user")]
    UserCancelled,

    /// More targets than a single batch may carry.
    #[error("List of {count} items exceeds {limit} which is the maximum number that can be processed at one time.")]
    BatchTooLarge { count: usize, limit: usize },

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The remote service rejected or failed a request
    #[error("{0}")]
    Remote(String),

    /// Local I/O failure
    #[error("I/O error: {0}")]
    Io(String),
}

impl KeyshareError {
    /// True when the user closed the prompt rather than an operation failing.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, KeyshareError::UserCancelled)
    }
}

impl From<std::io::Error> for KeyshareError {
    fn from(err: std::io::Error) -> Self {
        KeyshareError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for KeyshareError {
    fn from(err: serde_json::Error) -> Self {
        KeyshareError::Remote(format!("Malformed service response: {}", err))
    }
}
