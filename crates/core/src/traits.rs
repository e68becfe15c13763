//! ObjectStore trait definition
//!
//! This trait defines the primitive remote operations the transfer logic is
//! built on. It decouples the core from the S3 SDK so directory emulation
//! and transfers can be tested against an in-memory store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;
use crate::path::RemotePath;

/// A file materialized on local disk by a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalArtifact {
    /// Where the file landed
    pub path: PathBuf,
    /// Remote key it was fetched from
    pub source_key: String,
}

/// Primitive operations against a flat key-value bucket.
///
/// Implementations authenticate once at construction; the handle is reused
/// sequentially for the life of the process.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write the object at `dir/name`, silently replacing any existing
    /// object (last writer wins).
    async fn put(&self, dir: &str, name: &str, bytes: Vec<u8>) -> Result<()>;

    /// Fetch the object at `dir/name` into a file named `name` under
    /// `into`. A missing object is a `NotFound` error.
    async fn get(&self, dir: &str, name: &str, into: &Path) -> Result<LocalArtifact>;

    /// All object keys starting with `prefix`, in store order. Ordering is
    /// not guaranteed stable across calls.
    async fn list_under(&self, prefix: &str) -> Result<Vec<RemotePath>>;

    /// Best-effort removal. Deleting an absent object is not an error.
    async fn delete(&self, path: &str) -> Result<()>;

    /// Write a zero-length marker object standing in for a directory.
    async fn put_empty(&self, dir_path: &str) -> Result<()>;
}
