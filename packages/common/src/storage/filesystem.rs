use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufReader};

use super::error::StorageError;
use super::key::validate_key;
use super::traits::{BoxReader, HttpMetadata, ObjectInfo, ObjectStore, PutOptions};

/// Filesystem-backed object store.
///
/// Keys are hashed into a Git-style sharded layout under `base_path`, so
/// one key can never be the directory of another:
/// - `objects/{2 hex}/{62 hex}`: object bytes
/// - `meta/{2 hex}/{62 hex}.json`: serialized [`ObjectInfo`], including the key
/// - `.tmp/`: staging area for atomic renames
///
/// Metadata is written after the bytes, so an object is visible only once
/// both are in place.
pub struct FilesystemObjectStore {
    base_path: PathBuf,
}

impl FilesystemObjectStore {
    /// Create a new filesystem object store.
    pub async fn new(base_path: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(base_path.join("objects")).await?;
        fs::create_dir_all(base_path.join("meta")).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self { base_path })
    }

    /// `(shard, name)` for a key: the SHA-256 of the key split after one byte.
    fn shard(key: &str) -> (String, String) {
        let digest = Sha256::digest(key.as_bytes());
        (hex::encode(&digest[..1]), hex::encode(&digest[1..]))
    }

    fn object_path(&self, key: &str) -> PathBuf {
        let (shard, name) = Self::shard(key);
        self.base_path.join("objects").join(shard).join(name)
    }

    fn meta_root(&self) -> PathBuf {
        self.base_path.join("meta")
    }

    fn meta_path(&self, key: &str) -> PathBuf {
        let (shard, name) = Self::shard(key);
        self.meta_root().join(shard).join(format!("{name}.json"))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }

    /// Write `data` to `dest` via a temp file and rename.
    async fn write_atomic(&self, dest: &Path, data: &[u8]) -> Result<(), StorageError> {
        let temp_path = self.temp_path();

        let written = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(data).await?;
            file.flush().await?;
            drop(file);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::rename(&temp_path, dest).await
        }
        .await;

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn read_meta(path: &Path) -> Result<Option<ObjectInfo>, StorageError> {
        match fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Collect every metadata file below `dir`.
    async fn walk_meta(dir: PathBuf) -> Result<Vec<PathBuf>, StorageError> {
        let mut files = Vec::new();
        let mut pending = vec![dir];

        while let Some(dir) = pending.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "json") {
                    files.push(path);
                }
            }
        }

        Ok(files)
    }
}

#[async_trait]
impl ObjectStore for FilesystemObjectStore {
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

        self.write_atomic(&self.object_path(key), &data).await?;
        let meta = serde_json::to_vec(&info)?;
        self.write_atomic(&self.meta_path(key), &meta).await?;

        Ok(info)
    }

    async fn head(&self, key: &str) -> Result<Option<ObjectInfo>, StorageError> {
        if validate_key(key).is_err() {
            return Ok(None);
        }
        Self::read_meta(&self.meta_path(key)).await
    }

    async fn get_stream(
        &self,
        key: &str,
    ) -> Result<Option<(ObjectInfo, BoxReader)>, StorageError> {
        let Some(info) = self.head(key).await? else {
            return Ok(None);
        };
        match fs::File::open(self.object_path(key)).await {
            Ok(file) => Ok(Some((info, Box::new(BufReader::new(file))))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        if validate_key(key).is_err() {
            return Ok(false);
        }

        let existed = match fs::remove_file(self.meta_path(key)).await {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => return Err(e.into()),
        };
        match fs::remove_file(self.object_path(key)).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        Ok(existed)
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectInfo>, StorageError> {
        if prefix.contains("..") || prefix.starts_with('/') || prefix.contains('\\') {
            return Err(StorageError::InvalidKey(format!("invalid prefix: {prefix}")));
        }

        let mut objects = Vec::new();
        for path in Self::walk_meta(self.meta_root()).await? {
            if let Some(info) = Self::read_meta(&path).await?
                && info.key.starts_with(prefix)
            {
                objects.push(info);
            }
        }
        objects.sort_by(|a, b| a.key.cmp(&b.key));

        Ok(objects)
    }
}
