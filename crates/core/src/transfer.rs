//! Transfer operations
//!
//! Top-level operations combining the path convention, directory emulation
//! and local filesystem writes. One request at a time; no state is carried
//! between invocations beyond the borrowed store handle.

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::dir::DirEmulator;
use crate::error::{Error, Result};
use crate::path::{RemotePath, SEPARATOR};
use crate::traits::{LocalArtifact, ObjectStore};

pub struct Transfer<'a> {
    store: &'a dyn ObjectStore,
}

impl<'a> Transfer<'a> {
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self { store }
    }

    /// Upload one local file to a leaf object. Returns the byte count
    /// written.
    pub async fn upload(&self, local: &Path, remote: &RemotePath) -> Result<u64> {
        if remote.is_directory() {
            return Err(Error::InvalidPath(format!(
                "upload target must be a leaf object: {remote}"
            )));
        }
        let bytes = std::fs::read(local).map_err(|source| Error::LocalRead {
            path: local.to_path_buf(),
            source,
        })?;
        let size = bytes.len() as u64;
        let (dir, name) = remote.split();
        self.store.put(dir, name, bytes).await?;
        tracing::debug!(remote = %remote, size, "uploaded");
        Ok(size)
    }

    /// Download a leaf object or a whole directory prefix.
    ///
    /// For a directory-kind `remote`, `local` names a directory to create
    /// and populate; files fetched before a mid-batch failure stay in
    /// place. For a leaf, the object lands next to `local` under its
    /// remote base name and is renamed to `local` when the names differ.
    pub async fn download(&self, remote: &RemotePath, local: &Path) -> Result<Vec<LocalArtifact>> {
        if remote.is_directory() {
            self.download_directory(remote, local).await
        } else {
            let artifact = self.download_file(remote, local).await?;
            Ok(vec![artifact])
        }
    }

    async fn download_directory(
        &self,
        remote: &RemotePath,
        local: &Path,
    ) -> Result<Vec<LocalArtifact>> {
        std::fs::create_dir(local).map_err(|source| {
            if source.kind() == std::io::ErrorKind::AlreadyExists {
                Error::LocalExists(local.to_path_buf())
            } else {
                Error::LocalWrite {
                    path: local.to_path_buf(),
                    source,
                }
            }
        })?;
        DirEmulator::new(self.store)
            .download_all(remote, local)
            .await
            .map_err(|partial| partial.error)
    }

    async fn download_file(&self, remote: &RemotePath, local: &Path) -> Result<LocalArtifact> {
        let (dir, name) = remote.split();
        let into = match local.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let artifact = self.store.get(dir, name, &into).await?;

        // The fetch lands under the remote base name; reconcile with the
        // requested destination.
        if local.file_name() == Some(OsStr::new(name)) {
            return Ok(artifact);
        }
        if local.exists() {
            return Err(Error::LocalExists(local.to_path_buf()));
        }
        std::fs::rename(&artifact.path, local).map_err(|source| Error::Rename {
            from: artifact.path.clone(),
            to: local.to_path_buf(),
            source,
        })?;
        Ok(LocalArtifact {
            path: local.to_path_buf(),
            source_key: artifact.source_key,
        })
    }

    /// Download everything under `chain/key/` into `workdir`, write each
    /// file's content to `out` framed by a header line, then remove the
    /// local copy. Remote objects are left untouched.
    pub async fn dump_and_purge<W: Write>(
        &self,
        chain: &str,
        key: &str,
        workdir: &Path,
        out: &mut W,
    ) -> Result<()> {
        let prefix = RemotePath::join(&[chain, key])?.into_directory();
        let artifacts = DirEmulator::new(self.store)
            .download_all(&prefix, workdir)
            .await
            .map_err(|partial| partial.error)?;

        if artifacts.is_empty() {
            writeln!(out, "No files under {prefix}")?;
            return Ok(());
        }

        writeln!(out)?;
        for artifact in artifacts {
            let bytes = std::fs::read(&artifact.path).map_err(|source| Error::LocalRead {
                path: artifact.path.clone(),
                source,
            })?;
            writeln!(out, "---------- {} ----------", artifact.path.display())?;
            writeln!(out)?;
            out.write_all(&bytes)?;
            writeln!(out)?;
            writeln!(out)?;
            if let Err(err) = std::fs::remove_file(&artifact.path) {
                tracing::warn!("failed to remove {}: {err}", artifact.path.display());
            }
        }
        Ok(())
    }

    /// Remove one remote object. Absence of the object is not an error.
    pub async fn delete_remote(&self, path: &RemotePath) -> Result<()> {
        self.store.delete(path.as_str()).await
    }

    /// Create a remote directory marker. The trailing-separator check also
    /// runs in [`DirEmulator::mkdir`]; this user-facing entry point
    /// validates before anything reaches the store layer.
    pub async fn make_remote_directory(&self, dir: &RemotePath) -> Result<()> {
        if !dir.is_directory() {
            return Err(Error::InvalidPath(format!(
                "directory paths must end with '{SEPARATOR}': {dir}"
            )));
        }
        DirEmulator::new(self.store).mkdir(dir).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemStore;

    #[tokio::test]
    async fn test_upload_writes_object() {
        let store = MemStore::new();
        let workdir = tempfile::tempdir().unwrap();
        let local = workdir.path().join("sig.json");
        std::fs::write(&local, b"signed bytes").unwrap();

        let size = Transfer::new(&store)
            .upload(&local, &RemotePath::new("ethereum/validator1/sig.json"))
            .await
            .unwrap();

        assert_eq!(size, 12);
        assert_eq!(
            store.bytes("ethereum/validator1/sig.json"),
            Some(b"signed bytes".to_vec())
        );
    }

    #[tokio::test]
    async fn test_upload_unreadable_local_file() {
        let store = MemStore::new();
        let result = Transfer::new(&store)
            .upload(
                Path::new("/definitely/not/here.json"),
                &RemotePath::new("chain/key/file.json"),
            )
            .await;

        assert!(matches!(result, Err(Error::LocalRead { .. })));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_upload_rejects_directory_target() {
        let store = MemStore::new();
        let workdir = tempfile::tempdir().unwrap();
        let local = workdir.path().join("sig.json");
        std::fs::write(&local, b"x").unwrap();

        let result = Transfer::new(&store)
            .upload(&local, &RemotePath::new("chain/key/"))
            .await;

        assert!(matches!(result, Err(Error::InvalidPath(_))));
    }

    #[tokio::test]
    async fn test_upload_then_download_round_trips() {
        let store = MemStore::new();
        let transfer = Transfer::new(&store);
        let workdir = tempfile::tempdir().unwrap();
        let local = workdir.path().join("sig.json");
        std::fs::write(&local, b"payload B").unwrap();

        transfer
            .upload(&local, &RemotePath::new("ethereum/validator1/sig.json"))
            .await
            .unwrap();

        let dest = workdir.path().join("out.json");
        let artifacts = transfer
            .download(&RemotePath::new("ethereum/validator1/sig.json"), &dest)
            .await
            .unwrap();

        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].path, dest);
        assert_eq!(std::fs::read(&dest).unwrap(), b"payload B");
        // download is non-destructive
        assert!(store.contains("ethereum/validator1/sig.json"));
    }

    #[tokio::test]
    async fn test_download_renames_to_requested_name() {
        let store = MemStore::new();
        store.insert("chain/key/sig.json", b"abc");
        let workdir = tempfile::tempdir().unwrap();
        let dest = workdir.path().join("out.json");

        Transfer::new(&store)
            .download(&RemotePath::new("chain/key/sig.json"), &dest)
            .await
            .unwrap();

        assert!(dest.exists());
        assert!(!workdir.path().join("sig.json").exists());
    }

    #[tokio::test]
    async fn test_download_same_name_needs_no_rename() {
        let store = MemStore::new();
        store.insert("chain/key/sig.json", b"abc");
        let workdir = tempfile::tempdir().unwrap();
        let dest = workdir.path().join("sig.json");

        let artifacts = Transfer::new(&store)
            .download(&RemotePath::new("chain/key/sig.json"), &dest)
            .await
            .unwrap();

        assert_eq!(artifacts[0].path, dest);
        assert_eq!(std::fs::read(&dest).unwrap(), b"abc");
    }

    #[tokio::test]
    async fn test_download_existing_destination_is_a_conflict() {
        let store = MemStore::new();
        store.insert("chain/key/sig.json", b"new");
        let workdir = tempfile::tempdir().unwrap();
        let dest = workdir.path().join("out.json");
        std::fs::write(&dest, b"old").unwrap();

        let result = Transfer::new(&store)
            .download(&RemotePath::new("chain/key/sig.json"), &dest)
            .await;

        assert!(matches!(result, Err(Error::LocalExists(_))));
        // the fetch stays on disk under its original name
        assert_eq!(
            std::fs::read(workdir.path().join("sig.json")).unwrap(),
            b"new"
        );
        assert_eq!(std::fs::read(&dest).unwrap(), b"old");
    }

    #[tokio::test]
    async fn test_download_missing_object() {
        let store = MemStore::new();
        let workdir = tempfile::tempdir().unwrap();

        let result = Transfer::new(&store)
            .download(
                &RemotePath::new("chain/key/absent.json"),
                &workdir.path().join("out.json"),
            )
            .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_download_directory_populates_new_dir() {
        let store = MemStore::new();
        store.insert("chain/key/tx1.json", b"one");
        store.insert("chain/key/tx2.json", b"two");
        let workdir = tempfile::tempdir().unwrap();
        let dest = workdir.path().join("fetched");

        let artifacts = Transfer::new(&store)
            .download(&RemotePath::new("chain/key/"), &dest)
            .await
            .unwrap();

        assert_eq!(artifacts.len(), 2);
        assert_eq!(std::fs::read(dest.join("tx1.json")).unwrap(), b"one");
        assert_eq!(std::fs::read(dest.join("tx2.json")).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_download_directory_rejects_existing_destination() {
        let store = MemStore::new();
        let workdir = tempfile::tempdir().unwrap();
        let dest = workdir.path().join("fetched");
        std::fs::create_dir(&dest).unwrap();

        let result = Transfer::new(&store)
            .download(&RemotePath::new("chain/key/"), &dest)
            .await;

        assert!(matches!(result, Err(Error::LocalExists(_))));
    }

    #[tokio::test]
    async fn test_download_directory_partial_failure_leaves_fetched_files() {
        let mut store = MemStore::new();
        for name in ["a", "b", "c", "d", "e"] {
            store.insert(&format!("chain/key/{name}.json"), name.as_bytes());
        }
        store.fail_get_after = Some(2);
        let workdir = tempfile::tempdir().unwrap();
        let dest = workdir.path().join("fetched");

        let result = Transfer::new(&store)
            .download(&RemotePath::new("chain/key/"), &dest)
            .await;

        assert!(result.is_err());
        assert!(dest.join("a.json").exists());
        assert!(dest.join("b.json").exists());
        assert!(!dest.join("c.json").exists());
    }

    #[tokio::test]
    async fn test_dump_and_purge_prints_and_removes_local_copies() {
        let store = MemStore::new();
        store.insert("cosmoshub/validator1/tx1.json", b"first body");
        store.insert("cosmoshub/validator1/tx2.json", b"second body");
        let workdir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();

        Transfer::new(&store)
            .dump_and_purge("cosmoshub", "validator1", workdir.path(), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("tx1.json"));
        assert!(text.contains("first body"));
        assert!(text.contains("tx2.json"));
        assert!(text.contains("second body"));
        assert!(text.contains("----------"));
        // local copies are gone, remote objects are untouched
        assert!(!workdir.path().join("tx1.json").exists());
        assert!(!workdir.path().join("tx2.json").exists());
        assert!(store.contains("cosmoshub/validator1/tx1.json"));
        assert!(store.contains("cosmoshub/validator1/tx2.json"));
    }

    #[tokio::test]
    async fn test_dump_and_purge_empty_prefix() {
        let store = MemStore::new();
        let workdir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();

        Transfer::new(&store)
            .dump_and_purge("cosmoshub", "validator1", workdir.path(), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No files under cosmoshub/validator1/"));
    }

    #[tokio::test]
    async fn test_delete_remote_absent_object_is_ok() {
        let store = MemStore::new();
        Transfer::new(&store)
            .delete_remote(&RemotePath::new("chain/key/absent.json"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_remote_removes_object() {
        let store = MemStore::new();
        store.insert("chain/key/sig.json", b"x");

        Transfer::new(&store)
            .delete_remote(&RemotePath::new("chain/key/sig.json"))
            .await
            .unwrap();

        assert!(!store.contains("chain/key/sig.json"));
    }

    #[tokio::test]
    async fn test_make_remote_directory_validates_kind() {
        let store = MemStore::new();
        let transfer = Transfer::new(&store);

        let result = transfer
            .make_remote_directory(&RemotePath::new("chain/key"))
            .await;
        assert!(matches!(result, Err(Error::InvalidPath(_))));
        assert_eq!(store.len(), 0);

        transfer
            .make_remote_directory(&RemotePath::new("chain/key/"))
            .await
            .unwrap();
        assert!(store.contains("chain/key/"));
    }
}
