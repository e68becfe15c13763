//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from
//! sigstash-core. This is the only place the AWS SDK is touched.

use std::path::Path;

use async_trait::async_trait;

use sigstash_core::config::Storage;
use sigstash_core::{Error, LocalArtifact, ObjectStore, RemotePath, Result};

/// S3 client bound to one bucket.
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Client {
    /// Build a client from the storage section of the config.
    ///
    /// Credentials and endpoint are fixed for the client's lifetime.
    pub async fn new(storage: &Storage) -> Result<Self> {
        let credentials = aws_credential_types::Credentials::new(
            storage.access_key.clone(),
            storage.secret_key.clone(),
            None, // session token
            None, // expiry
            "sigstash-static-credentials",
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(storage.region.clone()));
        if let Some(endpoint) = &storage.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let config = loader.load().await;

        // Path-style addressing for custom endpoints (MinIO and friends)
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(storage.endpoint.is_some())
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: storage.bucket.clone(),
        })
    }

    fn object_key(dir: &str, name: &str) -> String {
        let dir = dir.trim_end_matches('/');
        if dir.is_empty() {
            name.to_string()
        } else {
            format!("{dir}/{name}")
        }
    }

    fn is_missing(err: &str) -> bool {
        err.contains("NotFound") || err.contains("NoSuchKey")
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn put(&self, dir: &str, name: &str, bytes: Vec<u8>) -> Result<()> {
        let key = Self::object_key(dir, name);
        tracing::debug!(key = %key, size = bytes.len(), "putting object");

        let content_type: Option<String> = mime_guess::from_path(name)
            .first()
            .map(|mime| mime.essence_str().to_string());

        let mut request = self
            .inner
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(aws_sdk_s3::primitives::ByteStream::from(bytes));
        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        request
            .send()
            .await
            .map_err(|e| Error::RemoteWrite(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, dir: &str, name: &str, into: &Path) -> Result<LocalArtifact> {
        let key = Self::object_key(dir, name);

        let response = self
            .inner
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| {
                let err = e.to_string();
                if Self::is_missing(&err) {
                    Error::NotFound(key.clone())
                } else {
                    Error::RemoteRead(err)
                }
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| Error::RemoteRead(e.to_string()))?
            .into_bytes();

        let path = into.join(name);
        std::fs::write(&path, &data).map_err(|source| Error::LocalWrite {
            path: path.clone(),
            source,
        })?;

        Ok(LocalArtifact {
            path,
            source_key: key,
        })
    }

    async fn list_under(&self, prefix: &str) -> Result<Vec<RemotePath>> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut request = self
                .inner
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);
            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let response = request
                .send()
                .await
                .map_err(|e| Error::RemoteList(e.to_string()))?;

            for object in response.contents() {
                if let Some(key) = object.key() {
                    keys.push(RemotePath::new(key));
                }
            }

            if response.is_truncated().unwrap_or(false) {
                continuation_token = response.next_continuation_token().map(|s| s.to_string());
            } else {
                break;
            }
        }

        Ok(keys)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        if let Err(e) = self
            .inner
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
        {
            let err = e.to_string();
            if !Self::is_missing(&err) {
                return Err(Error::RemoteWrite(err));
            }
            tracing::debug!(key = path, "delete of absent object ignored");
        }
        Ok(())
    }

    async fn put_empty(&self, dir_path: &str) -> Result<()> {
        self.inner
            .put_object()
            .bucket(&self.bucket)
            .key(dir_path)
            .body(aws_sdk_s3::primitives::ByteStream::from(Vec::new()))
            .send()
            .await
            .map_err(|e| Error::RemoteWrite(e.to_string()))?;

        Ok(())
    }
}
