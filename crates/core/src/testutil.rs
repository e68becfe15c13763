//! In-memory ObjectStore used by unit tests.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::path::RemotePath;
use crate::traits::{LocalArtifact, ObjectStore};

/// Flat key-value store backed by a map.
///
/// `fail_get_after` makes every get call after the first n fail, for
/// exercising partial-batch behavior. Listing order is the map's key
/// order, which keeps tests deterministic.
pub(crate) struct MemStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    pub fail_get_after: Option<usize>,
    gets: AtomicUsize,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(BTreeMap::new()),
            fail_get_after: None,
            gets: AtomicUsize::new(0),
        }
    }

    pub fn insert(&self, key: &str, bytes: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes.to_vec());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn bytes(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    fn full_key(dir: &str, name: &str) -> String {
        let dir = dir.trim_end_matches('/');
        if dir.is_empty() {
            name.to_string()
        } else {
            format!("{dir}/{name}")
        }
    }
}

#[async_trait]
impl ObjectStore for MemStore {
    async fn put(&self, dir: &str, name: &str, bytes: Vec<u8>) -> Result<()> {
        self.objects
            .lock()
            .unwrap()
            .insert(Self::full_key(dir, name), bytes);
        Ok(())
    }

    async fn get(&self, dir: &str, name: &str, into: &Path) -> Result<LocalArtifact> {
        let calls = self.gets.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.fail_get_after {
            if calls >= limit {
                return Err(Error::RemoteRead("injected fetch failure".into()));
            }
        }
        let key = Self::full_key(dir, name);
        let bytes = self
            .objects
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::NotFound(key.clone()))?;
        let path = into.join(name);
        std::fs::write(&path, &bytes).map_err(|source| Error::LocalWrite {
            path: path.clone(),
            source,
        })?;
        Ok(LocalArtifact {
            path,
            source_key: key,
        })
    }

    async fn list_under(&self, prefix: &str) -> Result<Vec<RemotePath>> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|key| key.starts_with(prefix))
            .map(|key| RemotePath::new(key.clone()))
            .collect())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.objects.lock().unwrap().remove(path);
        Ok(())
    }

    async fn put_empty(&self, dir_path: &str) -> Result<()> {
        self.objects
            .lock()
            .unwrap()
            .insert(dir_path.to_string(), Vec::new());
        Ok(())
    }
}
