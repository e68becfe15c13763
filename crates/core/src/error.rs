//! Error types for sigstash-core
//!
//! Remote failures are classified by the operation that produced them so
//! the CLI can map each class onto a stable exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for sigstash-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sigstash-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed remote path: wrong kind, empty segment, stray separator
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Bech32 address could not be decoded or re-encoded
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Remote object missing on a required fetch
    #[error("not found: {0}")]
    NotFound(String),

    /// Local file could not be read
    #[error("failed to read {}: {}", .path.display(), .source)]
    LocalRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Local file or directory could not be written
    #[error("failed to write {}: {}", .path.display(), .source)]
    LocalWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Local destination already exists
    #[error("local path already exists: {}", .0.display())]
    LocalExists(PathBuf),

    /// Post-download rename failed; the fetched file stays under its
    /// original name
    #[error("failed to rename {} to {}: {}", .from.display(), .to.display(), .source)]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transport failure while writing or deleting a remote object
    #[error("remote write failed: {0}")]
    RemoteWrite(String),

    /// Transport failure while fetching a remote object
    #[error("remote read failed: {0}")]
    RemoteRead(String),

    /// Transport failure while listing remote objects
    #[error("remote list failed: {0}")]
    RemoteList(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
