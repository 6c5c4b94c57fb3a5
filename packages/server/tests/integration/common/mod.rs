use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use ::common::storage::{
    BoxReader, FilesystemObjectStore, MemoryObjectStore, ObjectInfo, ObjectStore, PutOptions,
    StorageError,
};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde_json::Value;

use server::config::{
    AppConfig, CorsConfig, DatabaseConfig, ServerConfig, StorageBackend, StorageConfig,
    UploadConfig,
};
use server::repository::DemoRepository;
use server::state::AppState;

pub const PUBLIC_URL: &str = "https://cdn.test";
pub const BUCKET: &str = "test-bucket";

pub mod routes {
    pub const HEALTH: &str = "/health";
    pub const UPLOAD: &str = "/upload";
    pub const DELETE: &str = "/delete";
    pub const LIST: &str = "/list";
    pub const ARTWORKS: &str = "/api/v1/artworks";
    pub const CATEGORIES: &str = "/api/v1/artworks/categories";
    pub const CONTACTS: &str = "/api/v1/contacts";
    pub const COMMISSIONS: &str = "/api/v1/commissions";
    pub const ABOUT: &str = "/api/v1/settings/about";

    pub fn image(key: &str) -> String {
        format!("/image/{key}")
    }

    pub fn file(key: &str) -> String {
        format!("/files/{key}")
    }

    pub fn artwork(id: impl std::fmt::Display) -> String {
        format!("/api/v1/artworks/{id}")
    }

    pub fn contact_read(id: i32) -> String {
        format!("/api/v1/contacts/{id}/read")
    }

    pub fn commission(id: i32) -> String {
        format!("/api/v1/commissions/{id}")
    }

    pub fn setting(key: &str) -> String {
        format!("/api/v1/settings/{key}")
    }
}

/// A running test server over demo data and a bucket of the caller's choice.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    /// Direct handle on the bucket the server writes to.
    pub store: Arc<dyn ObjectStore>,
    _bucket_dir: Option<tempfile::TempDir>,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors: CorsConfig {
                allow_origins: vec![],
                max_age: 3600,
            },
        },
        storage: StorageConfig {
            backend: StorageBackend::Memory,
            path: PathBuf::from("unused"),
            bucket_name: BUCKET.to_string(),
            public_url: Some(PUBLIC_URL.to_string()),
            public_hash: String::new(),
        },
        upload: UploadConfig::default(),
        database: DatabaseConfig::default(),
    }
}

impl TestApp {
    /// Server over an in-memory bucket.
    pub async fn spawn() -> Self {
        Self::spawn_with_store(Arc::new(MemoryObjectStore::new())).await
    }

    /// Server over a filesystem bucket in a temporary directory.
    pub async fn spawn_on_disk() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create bucket directory");
        let store = FilesystemObjectStore::new(dir.path().join("bucket"))
            .await
            .expect("Failed to open filesystem bucket");
        let mut app = Self::spawn_with_store(Arc::new(store)).await;
        app._bucket_dir = Some(dir);
        app
    }

    pub async fn spawn_with_store(store: Arc<dyn ObjectStore>) -> Self {
        let state = AppState {
            config: Arc::new(test_config()),
            store: store.clone(),
            repo: Arc::new(DemoRepository::new()),
        };

        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            store,
            _bucket_dir: None,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn request(&self, method: Method, path: &str) -> TestResponse {
        let res = self
            .client
            .request(method, self.url(path))
            .send()
            .await
            .expect("Failed to send request");

        TestResponse::from_response(res).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path).await
    }

    pub async fn send_json(&self, method: Method, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send JSON request");

        TestResponse::from_response(res).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> TestResponse {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> TestResponse {
        self.send_json(Method::PUT, path, body).await
    }

    /// Send a raw body labelled as JSON.
    pub async fn send_raw_json(&self, method: Method, path: &str, body: &str) -> TestResponse {
        let res = self
            .client
            .request(method, self.url(path))
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to send raw request");

        TestResponse::from_response(res).await
    }

    pub async fn delete_file(&self, body: &Value) -> TestResponse {
        self.send_json(Method::DELETE, routes::DELETE, body).await
    }

    pub async fn upload(
        &self,
        file_name: &str,
        file_bytes: Vec<u8>,
        mime: &str,
        folder: Option<&str>,
    ) -> TestResponse {
        let part = reqwest::multipart::Part::bytes(file_bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .expect("Failed to set MIME type");
        let mut form = reqwest::multipart::Form::new().part("file", part);
        if let Some(folder) = folder {
            form = form.text("folder", folder.to_string());
        }

        let res = self
            .client
            .post(self.url(routes::UPLOAD))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart upload request");

        TestResponse::from_response(res).await
    }

    /// Upload a small PNG and return its key.
    pub async fn upload_png(&self, file_name: &str, folder: Option<&str>) -> String {
        let res = self
            .upload(file_name, vec![0x89; 64], "image/png", folder)
            .await;
        assert_eq!(res.status, 200, "upload failed: {}", res.text);
        res.body["filename"].as_str().unwrap().to_string()
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            headers,
            text,
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn error(&self) -> &str {
        self.body["error"]
            .as_str()
            .expect("response body should contain 'error'")
    }
}

/// Bucket whose every call fails with an I/O error.
pub struct UnavailableStore;

fn unavailable() -> StorageError {
    StorageError::Io(std::io::Error::other("disk unavailable"))
}

#[async_trait]
impl ObjectStore for UnavailableStore {
    async fn put(&self, _: &str, _: Vec<u8>, _: PutOptions) -> Result<ObjectInfo, StorageError> {
        Err(unavailable())
    }
    async fn head(&self, _: &str) -> Result<Option<ObjectInfo>, StorageError> {
        Err(unavailable())
    }
    async fn get_stream(&self, _: &str) -> Result<Option<(ObjectInfo, BoxReader)>, StorageError> {
        Err(unavailable())
    }
    async fn delete(&self, _: &str) -> Result<bool, StorageError> {
        Err(unavailable())
    }
    async fn list(&self, _: &str) -> Result<Vec<ObjectInfo>, StorageError> {
        Err(unavailable())
    }
}

/// Bucket that panics on every call.
pub struct PanickingStore;

pub const PANIC_MESSAGE: &str = "bucket index corrupted";

#[async_trait]
impl ObjectStore for PanickingStore {
    async fn put(&self, _: &str, _: Vec<u8>, _: PutOptions) -> Result<ObjectInfo, StorageError> {
        panic!("{PANIC_MESSAGE}")
    }
    async fn head(&self, _: &str) -> Result<Option<ObjectInfo>, StorageError> {
        panic!("{PANIC_MESSAGE}")
    }
    async fn get_stream(&self, _: &str) -> Result<Option<(ObjectInfo, BoxReader)>, StorageError> {
        panic!("{PANIC_MESSAGE}")
    }
    async fn delete(&self, _: &str) -> Result<bool, StorageError> {
        panic!("{PANIC_MESSAGE}")
    }
    async fn list(&self, _: &str) -> Result<Vec<ObjectInfo>, StorageError> {
        panic!("{PANIC_MESSAGE}")
    }
}

/// Assert `key` looks like `{folder}/{millis}-{6 chars of [a-z0-9]}.{ext}`.
pub fn assert_generated_key(key: &str, folder: &str, ext: &str) {
    let rest = key
        .strip_prefix(folder)
        .and_then(|r| r.strip_prefix('/'))
        .unwrap_or_else(|| panic!("{key} is not under {folder}/"));
    let (stem, extension) = rest.rsplit_once('.').expect("key has an extension");
    assert_eq!(extension, ext);
    let (millis, suffix) = stem.split_once('-').expect("key has a '-' separator");
    assert!(!millis.is_empty() && millis.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(suffix.len(), 6);
    assert!(
        suffix
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    );
}
