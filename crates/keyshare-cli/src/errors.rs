//! Command failures and the exit codes they end the process with.

use std::fmt;

use keyshare_core::KeyshareError;

use crate::constants::exit_codes;

/// Which exit code a [`CliError`] maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing credentials or input.
    NotFound,
    /// Device credentials are unreadable or rejected.
    AuthFailed,
    /// Arguments that can't be acted on.
    InvalidInput,
}

/// A command failure with its own exit code and an optional follow-up line.
#[derive(Debug)]
pub struct CliError {
    kind: ErrorKind,
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(kind: ErrorKind, message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            hint,
        }
    }

    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message, Some(hint.into()))
    }

    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthFailed, message, Some(hint.into()))
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message, None)
    }

    #[cfg(test)]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> i32 {
        match self.kind {
            ErrorKind::NotFound => exit_codes::NOT_FOUND,
            ErrorKind::AuthFailed => exit_codes::AUTH_FAILED,
            ErrorKind::InvalidInput => exit_codes::INVALID_INPUT,
        }
    }
}

/// The hint goes on its own line so `main` can split it off.
impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n{}", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for CliError {}

/// How a failed command should end the process.
#[derive(Debug, PartialEq, Eq)]
pub enum Exit {
    /// The user backed out of a prompt; leave quietly.
    Cancelled,
    /// Print the error and exit with this code.
    Failed(i32),
}

/// Classify an error from a command handler.
pub fn classify(err: &anyhow::Error) -> Exit {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return Exit::Failed(cli.exit_code());
    }
    match err.downcast_ref::<KeyshareError>() {
        Some(KeyshareError::UserCancelled) => Exit::Cancelled,
        Some(KeyshareError::UnknownReference(_)) => Exit::Failed(exit_codes::NOT_FOUND),
        Some(KeyshareError::InvalidInput(_)) | Some(KeyshareError::BatchTooLarge { .. }) => {
            Exit::Failed(exit_codes::INVALID_INPUT)
        }
        _ => Exit::Failed(1),
    }
}
