pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod utils;

use std::any::Any;
use std::time::Duration;

use axum::Router;
use axum::extract::Request;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::config::CorsConfig;
use crate::error::AppError;
use crate::handlers::storage::not_found;
use crate::state::AppState;

/// Methods advertised on every response.
pub const CORS_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
/// Request headers advertised on every response.
pub const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Atelier Gallery API",
        version = "1.0.0",
        description = "Image storage and content API for a single-artist portfolio"
    ),
    paths(
        handlers::storage::health,
        handlers::storage::upload,
        handlers::storage::delete,
        handlers::storage::list,
        handlers::storage::get_image,
        handlers::storage::serve_file,
    ),
    nest((path = "/api/v1", api = V1Api)),
    tags(
        (name = "Storage", description = "Image upload, lookup and deletion in the bucket"),
        (name = "Artworks", description = "Gallery pieces"),
        (name = "Contacts", description = "Contact form messages"),
        (name = "Commissions", description = "Commission requests"),
        (name = "Settings", description = "Site settings and About page content"),
    ),
)]
struct ApiDoc;

#[derive(OpenApi)]
#[openapi(paths(
    handlers::artwork::list_artworks,
    handlers::artwork::list_categories,
    handlers::artwork::get_artwork,
    handlers::artwork::create_artwork,
    handlers::artwork::update_artwork,
    handlers::artwork::delete_artwork,
    handlers::contact::submit_contact,
    handlers::contact::list_contacts,
    handlers::contact::mark_contact_read,
    handlers::commission::submit_commission,
    handlers::commission::list_commissions,
    handlers::commission::update_commission_status,
    handlers::settings::get_about,
    handlers::settings::update_about,
    handlers::settings::get_setting,
    handlers::settings::update_setting,
))]
struct V1Api;

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origin = if cors.allow_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            cors.allow_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(cors.max_age))
}

/// Turn a handler panic into a `500 {error}` response.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Internal server error".to_string()
    };
    AppError::Internal(message).into_response()
}

/// Answer `OPTIONS` on any path with an empty 200; CORS headers are added by
/// the outer layers.
async fn short_circuit_options(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        .merge(routes::storage_routes(&config))
        .nest("/api", routes::api_routes())
        .fallback(not_found)
        .with_state(state)
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(short_circuit_options))
        .layer(cors_layer(&config.server.cors))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ))
}
