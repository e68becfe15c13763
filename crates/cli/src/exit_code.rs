//! Exit code definitions for the sigstash CLI
//!
//! These codes follow a consistent convention so scripts and automation
//! can distinguish failure classes.

use sigstash_core::Error;

/// Exit codes for the sigstash CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully
    Success = 0,

    /// General/unspecified error
    GeneralError = 1,

    /// User input error: invalid arguments, malformed path, bad config
    UsageError = 2,

    /// Transport error talking to the bucket
    NetworkError = 3,

    /// Remote object does not exist
    NotFound = 5,

    /// Local destination already exists
    Conflict = 6,

    /// Operation was interrupted (e.g., Ctrl+C)
    Interrupted = 130,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Map a core error onto its exit code.
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::InvalidPath(_)
            | Error::InvalidAddress(_)
            | Error::Config(_)
            | Error::TomlParse(_) => Self::UsageError,
            Error::RemoteWrite(_) | Error::RemoteRead(_) | Error::RemoteList(_) => {
                Self::NetworkError
            }
            Error::NotFound(_) => Self::NotFound,
            Error::LocalExists(_) => Self::Conflict,
            Error::LocalRead { .. }
            | Error::LocalWrite { .. }
            | Error::Rename { .. }
            | Error::Io(_) => Self::GeneralError,
        }
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Operation completed successfully",
            Self::GeneralError => "General error",
            Self::UsageError => "Invalid arguments, path format, or config",
            Self::NetworkError => "Transport error (retryable)",
            Self::NotFound => "Remote object not found",
            Self::Conflict => "Local destination already exists",
            Self::Interrupted => "Operation interrupted",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
