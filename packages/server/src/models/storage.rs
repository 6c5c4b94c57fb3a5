use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use common::storage::{HttpMetadata, ObjectInfo};
use serde::{Deserialize, Serialize};

/// Response body for `GET /health`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    /// Name of the bucket this handler fronts.
    #[schema(example = "atelier-gallery")]
    pub bucket: String,
}

/// Response body for a successful upload.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    /// Generated object key.
    #[schema(example = "artworks/1718000000000-k3j9x2.png")]
    pub filename: String,
    /// Public URL of the stored object.
    #[schema(example = "https://cdn.example.com/artworks/1718000000000-k3j9x2.png")]
    pub url: String,
    /// Size in bytes.
    #[schema(example = 2048)]
    pub size: u64,
    /// MIME type of the stored object.
    #[serde(rename = "type")]
    #[schema(example = "image/png")]
    pub content_type: String,
}

/// Request body for `DELETE /delete`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct DeleteRequest {
    /// Object key to delete.
    #[schema(example = "artworks/1718000000000-k3j9x2.png")]
    pub filename: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    /// Key that was deleted.
    pub deleted: String,
}

/// One entry of `GET /list`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ImageSummary {
    pub key: String,
    pub size: u64,
    pub uploaded: DateTime<Utc>,
    pub url: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ImageListResponse {
    pub images: Vec<ImageSummary>,
    pub count: usize,
}

/// Response body for `GET /image/{filename}`.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageDetailResponse {
    pub key: String,
    pub size: u64,
    pub uploaded: DateTime<Utc>,
    pub http_metadata: HttpMetadata,
    /// `originalName` and `uploadedAt` for objects written by `/upload`.
    pub custom_metadata: BTreeMap<String, String>,
    pub url: String,
}

impl ImageSummary {
    pub fn from_info(info: ObjectInfo, url: String) -> Self {
        Self {
            key: info.key,
            size: info.size,
            uploaded: info.uploaded,
            url,
        }
    }
}

impl ImageDetailResponse {
    pub fn from_info(info: ObjectInfo, url: String) -> Self {
        Self {
            key: info.key,
            size: info.size,
            uploaded: info.uploaded,
            http_metadata: info.http_metadata,
            custom_metadata: info.custom_metadata,
            url,
        }
    }
}
