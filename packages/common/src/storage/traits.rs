use std::collections::BTreeMap;
use std::io::Cursor;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// HTTP-facing metadata recorded alongside an object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HttpMetadata {
    /// MIME type supplied at upload time.
    #[schema(example = "image/png")]
    pub content_type: Option<String>,
}

/// Everything the store knows about an object except its bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInfo {
    #[schema(example = "artworks/1718000000000-k3j9x2.png")]
    pub key: String,
    /// Size in bytes.
    #[schema(example = 2048)]
    pub size: u64,
    /// Time the object was written.
    pub uploaded: DateTime<Utc>,
    #[serde(default)]
    pub http_metadata: HttpMetadata,
    /// Free-form string metadata, set once at creation.
    #[serde(default)]
    pub custom_metadata: BTreeMap<String, String>,
}

/// Options for writing a new object.
#[derive(Debug, Clone, Default)]
pub struct PutOptions {
    pub content_type: Option<String>,
    pub custom_metadata: BTreeMap<String, String>,
}

/// Keyed object storage, modelled on S3-style buckets.
///
/// Objects are written once and never modified in place: replacing content
/// means writing a new key and deleting the old one.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key`, replacing any previous object with that key.
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        options: PutOptions,
    ) -> Result<ObjectInfo, StorageError>;

    /// Fetch object metadata, or `None` if the key does not exist.
    async fn head(&self, key: &str) -> Result<Option<ObjectInfo>, StorageError>;

    /// Open an object for streaming, or `None` if the key does not exist.
    async fn get_stream(&self, key: &str)
    -> Result<Option<(ObjectInfo, BoxReader)>, StorageError>;

    /// Retrieve all bytes of an object.
    async fn get(&self, key: &str) -> Result<Option<(ObjectInfo, Vec<u8>)>, StorageError> {
        let Some((info, mut reader)) = self.get_stream(key).await? else {
            return Ok(None);
        };
        let mut buf = Vec::with_capacity(info.size as usize);
        reader.read_to_end(&mut buf).await?;
        Ok(Some((info, buf)))
    }

    /// Delete an object.
    ///
    /// Returns `true` if the object was deleted, `false` if it did not exist.
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;

    /// List all objects whose key starts with `prefix`, ordered by key.
    async fn list(&self, prefix: &str) -> Result<Vec<ObjectInfo>, StorageError>;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.head(key).await?.is_some())
    }
}

/// Wrap owned bytes as a [`BoxReader`].
pub fn reader_from_bytes(data: Vec<u8>) -> BoxReader {
    Box::new(Cursor::new(data))
}
