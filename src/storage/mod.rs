// Storage layer (S3-compatible)

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

pub mod s3_client;

pub use s3_client::S3Backend;

/// One stored object under a listing prefix.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ListingEntry {
    pub key: String,
    pub size: i64,
    /// ISO-8601 timestamp of the last write.
    pub last_modified: String,
}

/// One page of a prefix listing; `next` carries the backend continuation token.
#[derive(Debug, Default)]
pub struct ListPage {
    pub entries: Vec<ListingEntry>,
    pub next: Option<String>,
}

/// Endpoint URL plus the form fields a client must include to POST an object
/// directly to the backend.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PresignedPost {
    pub url: String,
    pub fields: BTreeMap<String, String>,
}

/// Backend failures, split by the operation that hit them. No retries; the
/// underlying error text travels upward untouched.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error(transparent)]
    Write(anyhow::Error),

    #[error(transparent)]
    List(anyhow::Error),

    #[error(transparent)]
    Sign(anyhow::Error),
}

/// Raw object-storage operations. Kept narrow so tests can substitute an
/// in-memory backend for the real S3 client.
#[async_trait]
pub trait ObjectBackend: Send + Sync {
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> anyhow::Result<()>;

    async fn list_page(&self, prefix: &str, continuation: Option<&str>)
        -> anyhow::Result<ListPage>;

    async fn presign_get(&self, key: &str, expires_in_secs: u64) -> anyhow::Result<String>;

    async fn presign_post(&self, key: &str, expires_in_secs: u64)
        -> anyhow::Result<PresignedPost>;
}

/// Domain operations over a backend and bucket: key construction, uploads,
/// listings, presigned URLs.
pub struct ScribeStore {
    backend: Arc<dyn ObjectBackend>,
    bucket: String,
}

impl ScribeStore {
    pub fn new(backend: Arc<dyn ObjectBackend>, bucket: impl Into<String>) -> Self {
        Self {
            backend,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Key for a new upload: `scribes/<scribe_id>/<prefix>/<uuid>_<name>`.
    /// The embedded uuid makes every call produce a fresh key, so writes
    /// never need an existence check.
    pub fn generate_key(prefix: &str, scribe_id: &str, name: &str) -> String {
        format!("scribes/{}/{}/{}_{}", scribe_id, prefix, Uuid::new_v4(), name)
    }

    /// Write raw bytes under `key` and return the `s3://` URI. Content type
    /// defaults to `application/octet-stream`.
    pub async fn put_bytes(
        &self,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        let fallback = mime::APPLICATION_OCTET_STREAM;
        let content_type = content_type.unwrap_or_else(|| fallback.as_ref());
        self.backend
            .put_object(key, data, content_type)
            .await
            .map_err(StorageError::Write)?;
        Ok(format!("s3://{}/{}", self.bucket, key))
    }

    /// Serialize `value` as UTF-8 JSON (non-ASCII preserved, not escaped)
    /// and write it under `key`.
    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<String, StorageError> {
        let body = serde_json::to_vec(value).map_err(|e| StorageError::Write(e.into()))?;
        let json_type = mime::APPLICATION_JSON;
        self.put_bytes(key, body.into(), Some(json_type.as_ref()))
            .await
    }

    /// Enumerate every object whose key starts with `prefix`, following
    /// backend pagination until exhausted. Entries stay in backend order.
    pub async fn list_prefix(&self, prefix: &str) -> Result<Vec<ListingEntry>, StorageError> {
        let mut entries = Vec::new();
        let mut continuation: Option<String> = None;
        loop {
            let page = self
                .backend
                .list_page(prefix, continuation.as_deref())
                .await
                .map_err(StorageError::List)?;
            entries.extend(page.entries);
            match page.next {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }
        Ok(entries)
    }

    /// Time-limited GET URL for `key`. Does not verify the key exists.
    pub async fn presign_get(&self, key: &str, expires_in_secs: u64) -> Result<String, StorageError> {
        self.backend
            .presign_get(key, expires_in_secs)
            .await
            .map_err(StorageError::Sign)
    }

    /// Presigned POST for a direct client upload. The key uses the exact
    /// caller-chosen filename, no uuid, so the caller controls overwrites.
    pub async fn presign_post(
        &self,
        prefix: &str,
        scribe_id: &str,
        filename: &str,
        expires_in_secs: u64,
    ) -> Result<(String, PresignedPost), StorageError> {
        let key = format!("scribes/{scribe_id}/{prefix}/{filename}");
        let post = self
            .backend
            .presign_post(&key, expires_in_secs)
            .await
            .map_err(StorageError::Sign)?;
        Ok((key, post))
    }
}
