//! Data access for gallery content.
//!
//! A single [`GalleryRepository`] is chosen at startup: [`DemoRepository`]
//! when no database is configured, [`DatabaseRepository`] otherwise.

mod database;
mod demo;

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::entity::{artwork, commission, contact, site_setting};

pub use database::DatabaseRepository;
pub use demo::DemoRepository;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("Database not configured")]
    NotConfigured,
    #[error(transparent)]
    Database(#[from] DbErr),
}

/// Filters for listing artworks.
#[derive(Debug, Clone, Default)]
pub struct ArtworkFilter {
    /// Exact category; `None` means every category.
    pub category: Option<String>,
    pub featured_only: bool,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct NewArtwork {
    pub title: String,
    pub category: String,
    pub year: i32,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub is_featured: bool,
    pub is_sold: bool,
    pub image_url: Option<String>,
    pub image_filename: Option<String>,
}

/// Field-level changes to an artwork. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ArtworkChanges {
    pub title: Option<String>,
    pub category: Option<String>,
    pub year: Option<i32>,
    pub description: Option<Option<String>>,
    pub price: Option<Option<f64>>,
    pub is_featured: Option<bool>,
    pub is_sold: Option<bool>,
    pub image_url: Option<Option<String>>,
    pub image_filename: Option<Option<String>>,
}

#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub project_type: Option<String>,
    pub budget: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct NewCommission {
    pub name: String,
    pub email: String,
    pub project_type: String,
    pub vision: String,
    pub budget: Option<String>,
}

#[async_trait]
pub trait GalleryRepository: Send + Sync {
    /// Artworks matching `filter`.
    async fn list_artworks(&self, filter: &ArtworkFilter) -> Result<Vec<artwork::Model>, RepoError>;

    async fn find_artwork(&self, id: i32) -> Result<Option<artwork::Model>, RepoError>;

    /// Category of every artwork, duplicates included.
    async fn artwork_categories(&self) -> Result<Vec<String>, RepoError>;

    async fn create_artwork(&self, input: NewArtwork) -> Result<artwork::Model, RepoError>;

    async fn update_artwork(
        &self,
        id: i32,
        changes: ArtworkChanges,
    ) -> Result<artwork::Model, RepoError>;

    /// Returns `false` if no artwork had this id.
    async fn delete_artwork(&self, id: i32) -> Result<bool, RepoError>;

    async fn insert_contact(&self, input: NewContact) -> Result<contact::Model, RepoError>;

    /// Contact messages, newest first.
    async fn list_contacts(&self, unread_only: bool) -> Result<Vec<contact::Model>, RepoError>;

    async fn mark_contact_read(&self, id: i32) -> Result<contact::Model, RepoError>;

    async fn insert_commission(&self, input: NewCommission)
    -> Result<commission::Model, RepoError>;

    /// Commission requests, newest first.
    async fn list_commissions(
        &self,
        status: Option<&str>,
    ) -> Result<Vec<commission::Model>, RepoError>;

    async fn update_commission_status(
        &self,
        id: i32,
        status: &str,
    ) -> Result<commission::Model, RepoError>;

    /// Stored settings among `keys`. Missing keys are simply absent.
    async fn settings(&self, keys: &[&str]) -> Result<Vec<site_setting::Model>, RepoError>;

    /// Insert or overwrite each `(key, value)` pair.
    async fn upsert_settings(&self, entries: Vec<(String, String)>) -> Result<(), RepoError>;
}
