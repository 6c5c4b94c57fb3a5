use std::sync::Arc;

use common::storage::ObjectStore;

use crate::config::AppConfig;
use crate::repository::GalleryRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn ObjectStore>,
    pub repo: Arc<dyn GalleryRepository>,
}
