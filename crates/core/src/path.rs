//! Remote path convention
//!
//! Object keys form a pseudo-hierarchy `<chain>/<key>/<file>` over a flat
//! bucket. A trailing separator marks a directory target; everything else
//! is a leaf object carrying a payload.

use std::fmt;

use crate::error::{Error, Result};

/// Separator between path segments in object keys.
pub const SEPARATOR: char = '/';

/// What a remote path denotes, derived from its trailing separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// An object carrying a payload
    Leaf,
    /// A directory-emulation target
    Directory,
}

/// A remote object key or directory prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePath {
    raw: String,
}

impl RemotePath {
    /// Wrap a raw key or prefix as given by the caller.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Join non-empty segments with exactly one separator between them.
    ///
    /// An empty segment, or a segment containing the separator, is a
    /// caller error.
    pub fn join(segments: &[&str]) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::InvalidPath("no path segments given".into()));
        }
        for segment in segments {
            if segment.is_empty() {
                return Err(Error::InvalidPath("empty path segment".into()));
            }
            if segment.contains(SEPARATOR) {
                return Err(Error::InvalidPath(format!(
                    "segment '{segment}' contains '{SEPARATOR}'"
                )));
            }
        }
        Ok(Self {
            raw: segments.join("/"),
        })
    }

    pub fn kind(&self) -> PathKind {
        if self.raw.ends_with(SEPARATOR) {
            PathKind::Directory
        } else {
            PathKind::Leaf
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind() == PathKind::Directory
    }

    /// Split into `(dir, base)`.
    ///
    /// `base` is empty when the path is itself a directory; `dir` is empty
    /// when the path has a single segment.
    pub fn split(&self) -> (&str, &str) {
        if self.is_directory() {
            return (self.raw.as_str(), "");
        }
        match self.raw.rfind(SEPARATOR) {
            Some(pos) => (&self.raw[..pos], &self.raw[pos + 1..]),
            None => ("", self.raw.as_str()),
        }
    }

    /// Base name of the key, used to name fetched files on disk.
    pub fn base(&self) -> &str {
        self.split().1
    }

    /// This path with a trailing separator appended if missing.
    pub fn into_directory(self) -> Self {
        if self.is_directory() {
            self
        } else {
            Self {
                raw: format!("{}{}", self.raw, SEPARATOR),
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
