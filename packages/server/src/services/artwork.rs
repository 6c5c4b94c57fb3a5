use common::storage::ObjectStore;

use crate::models::artwork::{
    ArtworkListQuery, ArtworkResponse, CreateArtworkRequest, UpdateArtworkRequest,
};
use crate::models::shared::{non_blank, validate_title};
use crate::repository::{ArtworkChanges, ArtworkFilter, GalleryRepository, NewArtwork, RepoError};

use super::ServiceResponse;

/// Category entry that disables filtering.
pub const ALL_CATEGORIES: &str = "all";

pub struct ArtworkService<'a> {
    repo: &'a dyn GalleryRepository,
    store: &'a dyn ObjectStore,
}

impl<'a> ArtworkService<'a> {
    pub fn new(repo: &'a dyn GalleryRepository, store: &'a dyn ObjectStore) -> Self {
        Self { repo, store }
    }

    /// Artworks newest first, optionally filtered by category and featured flag.
    pub async fn fetch_artworks(
        &self,
        query: ArtworkListQuery,
    ) -> ServiceResponse<Vec<ArtworkResponse>> {
        let filter = ArtworkFilter {
            category: non_blank(query.category).filter(|c| c != ALL_CATEGORIES),
            featured_only: query.featured.unwrap_or(false),
            limit: query.limit,
        };

        match self.repo.list_artworks(&filter).await {
            Ok(rows) => ServiceResponse::ok(rows.into_iter().map(Into::into).collect()),
            Err(e) => ServiceResponse::failure("Error fetching artworks", e),
        }
    }

    pub async fn fetch_artwork_by_id(&self, id: i32) -> ServiceResponse<ArtworkResponse> {
        match self.repo.find_artwork(id).await {
            Ok(Some(model)) => ServiceResponse::ok(model.into()),
            Ok(None) => ServiceResponse::failure("Error fetching artwork", RepoError::NotFound),
            Err(e) => ServiceResponse::failure("Error fetching artwork", e),
        }
    }

    /// `"all"` followed by each distinct category in first-seen order.
    pub async fn fetch_categories(&self) -> ServiceResponse<Vec<String>> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        match self.repo.artwork_categories().await {
            Ok(found) => {
                for category in found {
                    if !categories.contains(&category) {
                        categories.push(category);
                    }
                }
                ServiceResponse::ok(categories)
            }
            Err(e) => ServiceResponse::failure_with(categories, "Error fetching categories", e),
        }
    }

    pub async fn create_artwork(
        &self,
        req: CreateArtworkRequest,
    ) -> ServiceResponse<ArtworkResponse> {
        if let Err(msg) = validate_title(&req.title) {
            return ServiceResponse::failure("Invalid artwork", RepoError::Validation(msg));
        }
        let category = req.category.trim().to_string();
        if category.is_empty() {
            return ServiceResponse::failure(
                "Invalid artwork",
                RepoError::Validation("Category is required".into()),
            );
        }

        let input = NewArtwork {
            title: req.title.trim().to_string(),
            category,
            year: req.year,
            description: non_blank(req.description),
            price: req.price,
            is_featured: req.is_featured,
            is_sold: req.is_sold,
            image_url: non_blank(req.image_url),
            image_filename: non_blank(req.image_filename),
        };

        match self.repo.create_artwork(input).await {
            Ok(model) => {
                tracing::info!(id = model.id, title = %model.title, "Artwork created");
                ServiceResponse::ok(model.into())
            }
            Err(e) => ServiceResponse::failure("Error creating artwork", e),
        }
    }

    /// Apply a partial update. When the image is replaced, the previous blob
    /// is removed once the record update has succeeded.
    pub async fn update_artwork(
        &self,
        id: i32,
        req: UpdateArtworkRequest,
    ) -> ServiceResponse<ArtworkResponse> {
        if let Some(title) = &req.title
            && let Err(msg) = validate_title(title)
        {
            return ServiceResponse::failure("Invalid artwork", RepoError::Validation(msg));
        }

        let previous_image = if req.image_filename.is_some() {
            match self.repo.find_artwork(id).await {
                Ok(Some(existing)) => existing.image_filename,
                Ok(None) => {
                    return ServiceResponse::failure("Error updating artwork", RepoError::NotFound);
                }
                Err(e) => return ServiceResponse::failure("Error updating artwork", e),
            }
        } else {
            None
        };

        let changes = ArtworkChanges {
            title: req.title.map(|t| t.trim().to_string()),
            category: non_blank(req.category),
            year: req.year,
            description: req.description,
            price: req.price,
            is_featured: req.is_featured,
            is_sold: req.is_sold,
            image_url: req.image_url,
            image_filename: req.image_filename,
        };

        match self.repo.update_artwork(id, changes).await {
            Ok(model) => {
                if let Some(old) = previous_image
                    && model.image_filename.as_deref() != Some(old.as_str())
                {
                    self.remove_image(&old).await;
                }
                ServiceResponse::ok(model.into())
            }
            Err(e) => ServiceResponse::failure("Error updating artwork", e),
        }
    }

    /// Delete the record, then its image. A failed image delete is tolerated.
    pub async fn delete_artwork(&self, id: i32) -> ServiceResponse<bool> {
        let existing = match self.repo.find_artwork(id).await {
            Ok(Some(existing)) => existing,
            Ok(None) => {
                return ServiceResponse::failure("Error deleting artwork", RepoError::NotFound);
            }
            Err(e) => return ServiceResponse::failure("Error deleting artwork", e),
        };

        match self.repo.delete_artwork(id).await {
            Ok(true) => {}
            Ok(false) => {
                return ServiceResponse::failure("Error deleting artwork", RepoError::NotFound);
            }
            Err(e) => return ServiceResponse::failure("Error deleting artwork", e),
        }

        if let Some(key) = existing.image_filename.as_deref().filter(|k| !k.is_empty()) {
            self.remove_image(key).await;
        }
        tracing::info!(id, "Artwork deleted");
        ServiceResponse::ok(true)
    }

    async fn remove_image(&self, key: &str) {
        match self.store.delete(key).await {
            Ok(true) => tracing::info!(key, "Removed artwork image"),
            Ok(false) => tracing::debug!(key, "Artwork image already absent"),
            Err(e) => tracing::warn!(key, error = %e, "Failed to remove artwork image, blob left orphaned"),
        }
    }
}
