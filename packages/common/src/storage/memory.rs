use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::error::StorageError;
use super::key::validate_key;
use super::traits::{
    BoxReader, HttpMetadata, ObjectInfo, ObjectStore, PutOptions, reader_from_bytes,
};

struct Entry {
    info: ObjectInfo,
    data: Vec<u8>,
}

/// In-process object store.
///
/// Used for demo deployments and tests; contents are lost on restart.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: RwLock<BTreeMap<String, Entry>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        options: PutOptions,
    ) -> Result<ObjectInfo, StorageError> {
        validate_key(key)?;

        let info = ObjectInfo {
            key: key.to_string(),
            size: data.len() as u64,
            uploaded: Utc::now(),
            http_metadata: HttpMetadata {
                content_type: options.content_type,
            },
            custom_metadata: options.custom_metadata,
        };

        self.objects.write().await.insert(
            key.to_string(),
            Entry {
                info: info.clone(),
                data,
            },
        );

        Ok(info)
    }

    async fn head(&self, key: &str) -> Result<Option<ObjectInfo>, StorageError> {
        Ok(self.objects.read().await.get(key).map(|e| e.info.clone()))
    }

    async fn get_stream(
        &self,
        key: &str,
    ) -> Result<Option<(ObjectInfo, BoxReader)>, StorageError> {
        Ok(self
            .objects
            .read()
            .await
            .get(key)
            .map(|e| (e.info.clone(), reader_from_bytes(e.data.clone()))))
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.objects.write().await.remove(key).is_some())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectInfo>, StorageError> {
        let objects = self.objects.read().await;
        Ok(objects
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(_, e)| e.info.clone())
            .collect())
    }
}
