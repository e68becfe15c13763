//! Directory semantics over a flat key space
//!
//! The bucket has no native directory concept. Directories exist only as
//! zero-byte marker objects, and traversal is prefix listing.

use std::path::Path;

use crate::error::{Error, Result};
use crate::path::{PathKind, RemotePath, SEPARATOR};
use crate::traits::{LocalArtifact, ObjectStore};

/// A bulk download that stopped partway through.
///
/// Files fetched before the failure stay on disk; nothing is rolled back.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct PartialFetch {
    /// Artifacts materialized before the failure
    pub fetched: Vec<LocalArtifact>,
    /// The failure that stopped the batch
    pub error: Error,
}

/// Gives directory semantics to a flat key space.
pub struct DirEmulator<'a> {
    store: &'a dyn ObjectStore,
}

impl<'a> DirEmulator<'a> {
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self { store }
    }

    /// Create a directory by writing a zero-byte marker object.
    ///
    /// The path must be directory-kind; otherwise no remote call is made.
    /// Calling this twice is a harmless overwrite.
    pub async fn mkdir(&self, dir: &RemotePath) -> Result<()> {
        if !dir.is_directory() {
            return Err(Error::InvalidPath(format!(
                "directory paths must end with '{SEPARATOR}': {dir}"
            )));
        }
        self.store.put_empty(dir.as_str()).await
    }

    /// Fetch every object under `prefix` into `into`, each named by its
    /// key's base name, in listing order.
    ///
    /// Marker objects are listed but not fetched. An empty listing yields
    /// an empty artifact list, not an error. A fetch failure mid-batch
    /// stops the batch; files already written stay on disk.
    pub async fn download_all(
        &self,
        prefix: &RemotePath,
        into: &Path,
    ) -> std::result::Result<Vec<LocalArtifact>, PartialFetch> {
        let keys = self
            .store
            .list_under(prefix.as_str())
            .await
            .map_err(|error| PartialFetch {
                fetched: Vec::new(),
                error,
            })?;
        tracing::debug!(prefix = %prefix, count = keys.len(), "listed objects");

        let mut fetched = Vec::new();
        for key in keys {
            if key.kind() == PathKind::Directory {
                continue;
            }
            let (dir, base) = key.split();
            match self.store.get(dir, base, into).await {
                Ok(artifact) => fetched.push(artifact),
                Err(error) => return Err(PartialFetch { fetched, error }),
            }
        }
        Ok(fetched)
    }
}
