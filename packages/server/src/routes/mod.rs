mod v1;

use axum::{
    Router,
    routing::{MethodRouter, any, delete, get, post},
};

use crate::config::AppConfig;
use crate::handlers::storage;
use crate::state::AppState;

/// Unmatched methods on a known path answer 404 like unknown paths do.
pub(crate) fn strict(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(storage::not_found)
}

/// Upload/delete/list edge routes over the object store.
pub fn storage_routes(config: &AppConfig) -> Router<AppState> {
    let upload = Router::new()
        .route("/upload", strict(post(storage::upload)))
        .layer(storage::upload_body_limit(&config.upload));

    Router::new()
        .route("/health", any(storage::health))
        .route("/delete", strict(delete(storage::delete)))
        .route("/list", strict(get(storage::list)))
        .route("/image/{*filename}", strict(get(storage::get_image)))
        .route("/files/{*key}", strict(get(storage::serve_file)))
        .merge(upload)
}

pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/v1", v1::routes())
}
