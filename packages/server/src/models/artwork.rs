use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::artwork;

use super::shared::double_option;

/// Query parameters for listing artworks.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArtworkListQuery {
    /// Category to filter by; `all` or absent disables the filter.
    #[param(example = "abstract")]
    pub category: Option<String>,
    /// Only return featured pieces.
    #[param(example = true)]
    pub featured: Option<bool>,
    /// Maximum number of results.
    #[param(example = 6)]
    pub limit: Option<u64>,
}

/// Artwork as returned by the API.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ArtworkResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Golden Hour")]
    pub title: String,
    #[schema(example = "landscapes")]
    pub category: String,
    #[schema(example = 2024)]
    pub year: i32,
    pub description: Option<String>,
    #[schema(example = 1200.0)]
    pub price: Option<f64>,
    pub is_featured: bool,
    pub is_sold: bool,
    pub image_url: Option<String>,
    /// Bucket key of the image, if one was uploaded.
    #[schema(example = "artworks/1718000000000-k3j9x2.jpg")]
    pub image_filename: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<artwork::Model> for ArtworkResponse {
    fn from(m: artwork::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            category: m.category,
            year: m.year,
            description: m.description,
            price: m.price,
            is_featured: m.is_featured,
            is_sold: m.is_sold,
            image_url: m.image_url,
            image_filename: m.image_filename,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Request body for creating an artwork.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateArtworkRequest {
    #[schema(example = "Golden Hour")]
    pub title: String,
    #[schema(example = "landscapes")]
    pub category: String,
    #[schema(example = 2024)]
    pub year: i32,
    pub description: Option<String>,
    pub price: Option<f64>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_sold: bool,
    pub image_url: Option<String>,
    pub image_filename: Option<String>,
}

/// Request body for updating an artwork. Absent fields are left unchanged;
/// `null` clears a nullable field.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateArtworkRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Option<f64>>,
    pub is_featured: Option<bool>,
    pub is_sold: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_filename: Option<Option<String>>,
}
