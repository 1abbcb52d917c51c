//! CLI-specific error types with exit codes.
//!
//! Library errors are wrapped and mapped onto the exit codes the front desk
//! scripts rely on.

use posada::Error as LibError;
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Timeout waiting for database lock.
    Timeout,

    /// Data directory not found (and auto-init disabled).
    NoDataDirectory,

    /// Configuration error.
    Config(String),

    /// The request was understood but did not fully succeed.
    SemanticFailure(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Business-rule failure (conflict, capacity, bad transition, ...)
    /// - 2: Timeout waiting for database lock
    /// - 3: No data directory found
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SemanticFailure(_) => 1,
            Self::Library(lib_err) if lib_err.is_recoverable() => 1,
            Self::Library(LibError::Io(_)) => 5,
            Self::Library(LibError::Configuration(_)) => 7,
            Self::Library(_) => 6,
            Self::Timeout => 2,
            Self::NoDataDirectory => 3,
            Self::InvalidArguments(_) => 4,
            Self::Io(_) => 5,
            Self::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Library(LibError::RoomNoLongerAvailable {
                reservation,
                room,
                date,
                alternatives,
            }) => {
                write!(
                    f,
                    "room {room} is no longer available on {date} for reservation {reservation}; "
                )?;
                if alternatives.is_empty() {
                    write!(f, "no other rooms are free")
                } else {
                    let ids: Vec<String> = alternatives.iter().map(ToString::to_string).collect();
                    write!(f, "free rooms: {}", ids.join(", "))
                }
            }
            Self::Library(e) => write!(f, "{e}"),
            Self::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Timeout => write!(f, "Timeout waiting for database lock"),
            Self::NoDataDirectory => {
                write!(
                    f,
                    "Data directory not found (run `posada init` or drop --disable-autoinit)"
                )
            }
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Library(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::LockTimeout { .. } => Self::Timeout,
            LibError::DataDirectoryNotFound { .. } => Self::NoDataDirectory,
            other => Self::Library(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for CliError {
    fn from(e: csv::Error) -> Self {
        Self::Io(std::io::Error::other(e))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Io(std::io::Error::other(e))
    }
}
