use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins; empty means any origin (`*`).
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Filesystem,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Root directory for the filesystem backend.
    pub path: PathBuf,
    /// Bucket name reported by the health check.
    pub bucket_name: String,
    /// Public base URL objects are served from, without trailing slash.
    pub public_url: Option<String>,
    /// Account hash for the default `pub-{hash}.r2.dev` host.
    pub public_hash: String,
}

impl StorageConfig {
    /// Public URL for an object key.
    pub fn public_url_for(&self, key: &str) -> String {
        match self.public_url.as_deref().filter(|u| !u.is_empty()) {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
            None => format!("https://pub-{}.r2.dev/{}", self.public_hash, key),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Largest accepted file, in bytes.
    pub max_file_size: u64,
    /// Largest accepted request body for `/upload`, in bytes.
    pub body_limit: usize,
    pub allowed_types: Vec<String>,
    pub default_folder: String,
    /// Prefix enumerated by `/list`.
    pub list_prefix: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
            body_limit: 64 * 1024 * 1024,
            allowed_types: vec![
                "image/jpeg".into(),
                "image/png".into(),
                "image/webp".into(),
                "image/gif".into(),
            ],
            default_folder: "artworks".into(),
            list_prefix: "artworks/".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// PostgreSQL URL. When absent the server runs in demo mode.
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub upload: UploadConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let upload = UploadConfig::default();
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8787)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 86400)?
            .set_default("storage.backend", "filesystem")?
            .set_default("storage.path", "./data/bucket")?
            .set_default("storage.bucket_name", "atelier-gallery")?
            .set_default("storage.public_hash", "")?
            .set_default("upload.max_file_size", upload.max_file_size)?
            .set_default("upload.body_limit", upload.body_limit as u64)?
            .set_default("upload.allowed_types", upload.allowed_types)?
            .set_default("upload.default_folder", upload.default_folder)?
            .set_default("upload.list_prefix", upload.list_prefix)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., ATELIER__STORAGE__PUBLIC_URL)
            .add_source(
                Environment::with_prefix("ATELIER")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("upload.allowed_types")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
