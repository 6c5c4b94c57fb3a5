use std::sync::Arc;

use common::storage::{FilesystemObjectStore, MemoryObjectStore, ObjectStore};
use server::config::{AppConfig, StorageBackend};
use server::database::init_db;
use server::repository::{DatabaseRepository, DemoRepository, GalleryRepository};
use server::state::AppState;
use server::{build_router, seed};
use tracing::{Level, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let store: Arc<dyn ObjectStore> = match config.storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory object store; uploads are lost on restart");
            Arc::new(MemoryObjectStore::new())
        }
        StorageBackend::Filesystem => {
            info!("Object store rooted at {}", config.storage.path.display());
            Arc::new(FilesystemObjectStore::new(config.storage.path.clone()).await?)
        }
    };

    let repo: Arc<dyn GalleryRepository> =
        match config.database.url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => {
                let db = init_db(url).await?;
                seed::ensure_indexes(&db).await?;
                info!("Connected to database");
                Arc::new(DatabaseRepository::new(db))
            }
            None => {
                warn!("No database configured; serving demo data, admin writes are disabled");
                Arc::new(DemoRepository::new())
            }
        };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        config: Arc::new(config),
        store,
        repo,
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
