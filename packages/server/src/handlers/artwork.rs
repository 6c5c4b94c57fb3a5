use axum::extract::State;
use tracing::instrument;

use crate::extractors::json::ServiceJson;
use crate::extractors::path::{ServicePath, ServiceQuery};
use crate::models::artwork::{
    ArtworkListQuery, ArtworkResponse, CreateArtworkRequest, UpdateArtworkRequest,
};
use crate::services::{ArtworkService, ServiceResponse};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/artworks",
    tag = "Artworks",
    operation_id = "listArtworks",
    summary = "List artworks",
    description = "Newest first. `category=all` (or no category) disables the category filter.",
    params(ArtworkListQuery),
    responses(
        (status = 200, description = "Artworks in `data`", body = Vec<ArtworkResponse>),
        (status = 500, description = "Backend failure; `data` is null"),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_artworks(
    State(state): State<AppState>,
    ServiceQuery(query): ServiceQuery<ArtworkListQuery>,
) -> ServiceResponse<Vec<ArtworkResponse>> {
    ArtworkService::new(&*state.repo, &*state.store)
        .fetch_artworks(query)
        .await
}

#[utoipa::path(
    get,
    path = "/artworks/categories",
    tag = "Artworks",
    operation_id = "listCategories",
    summary = "List artwork categories",
    description = "`all` followed by each distinct category. On failure `data` is still `[\"all\"]`.",
    responses(
        (status = 200, description = "Categories in `data`", body = Vec<String>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> ServiceResponse<Vec<String>> {
    ArtworkService::new(&*state.repo, &*state.store)
        .fetch_categories()
        .await
}

#[utoipa::path(
    get,
    path = "/artworks/{id}",
    tag = "Artworks",
    operation_id = "getArtwork",
    summary = "Get an artwork by ID",
    params(("id" = i32, Path, description = "Artwork ID")),
    responses(
        (status = 200, description = "Artwork in `data`", body = ArtworkResponse),
        (status = 404, description = "Not found"),
    ),
)]
#[instrument(skip(state))]
pub async fn get_artwork(
    State(state): State<AppState>,
    ServicePath(id): ServicePath<i32>,
) -> ServiceResponse<ArtworkResponse> {
    ArtworkService::new(&*state.repo, &*state.store)
        .fetch_artwork_by_id(id)
        .await
}

#[utoipa::path(
    post,
    path = "/artworks",
    tag = "Artworks",
    operation_id = "createArtwork",
    summary = "Create an artwork",
    request_body = CreateArtworkRequest,
    responses(
        (status = 200, description = "Created artwork in `data`", body = ArtworkResponse),
        (status = 400, description = "Validation error"),
        (status = 503, description = "Database not configured"),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_artwork(
    State(state): State<AppState>,
    ServiceJson(payload): ServiceJson<CreateArtworkRequest>,
) -> ServiceResponse<ArtworkResponse> {
    ArtworkService::new(&*state.repo, &*state.store)
        .create_artwork(payload)
        .await
}

#[utoipa::path(
    put,
    path = "/artworks/{id}",
    tag = "Artworks",
    operation_id = "updateArtwork",
    summary = "Update an artwork",
    description = "Absent fields are left unchanged; `null` clears a nullable field. \
        Replacing `image_filename` removes the previous image from the bucket.",
    params(("id" = i32, Path, description = "Artwork ID")),
    request_body = UpdateArtworkRequest,
    responses(
        (status = 200, description = "Updated artwork in `data`", body = ArtworkResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found"),
        (status = 503, description = "Database not configured"),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_artwork(
    State(state): State<AppState>,
    ServicePath(id): ServicePath<i32>,
    ServiceJson(payload): ServiceJson<UpdateArtworkRequest>,
) -> ServiceResponse<ArtworkResponse> {
    ArtworkService::new(&*state.repo, &*state.store)
        .update_artwork(id, payload)
        .await
}

#[utoipa::path(
    delete,
    path = "/artworks/{id}",
    tag = "Artworks",
    operation_id = "deleteArtwork",
    summary = "Delete an artwork",
    description = "Deletes the record, then its image. A failed image delete is logged and ignored.",
    params(("id" = i32, Path, description = "Artwork ID")),
    responses(
        (status = 200, description = "`data` is true", body = bool),
        (status = 404, description = "Not found"),
        (status = 503, description = "Database not configured"),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_artwork(
    State(state): State<AppState>,
    ServicePath(id): ServicePath<i32>,
) -> ServiceResponse<bool> {
    ArtworkService::new(&*state.repo, &*state.store)
        .delete_artwork(id)
        .await
}
