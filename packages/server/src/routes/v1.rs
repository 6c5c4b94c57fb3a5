use axum::{
    Router,
    routing::{get, post, put},
};

use super::strict;
use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/artworks", artwork_routes())
        .nest("/contacts", contact_routes())
        .nest("/commissions", commission_routes())
        .nest("/settings", settings_routes())
}

fn artwork_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            strict(
                get(handlers::artwork::list_artworks).post(handlers::artwork::create_artwork),
            ),
        )
        .route(
            "/categories",
            strict(get(handlers::artwork::list_categories)),
        )
        .route(
            "/{id}",
            strict(
                get(handlers::artwork::get_artwork)
                    .put(handlers::artwork::update_artwork)
                    .delete(handlers::artwork::delete_artwork),
            ),
        )
}

fn contact_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            strict(get(handlers::contact::list_contacts).post(handlers::contact::submit_contact)),
        )
        .route(
            "/{id}/read",
            strict(post(handlers::contact::mark_contact_read)),
        )
}

fn commission_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            strict(
                get(handlers::commission::list_commissions)
                    .post(handlers::commission::submit_commission),
            ),
        )
        .route(
            "/{id}",
            strict(put(handlers::commission::update_commission_status)),
        )
}

fn settings_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/about",
            strict(get(handlers::settings::get_about).put(handlers::settings::update_about)),
        )
        .route(
            "/{key}",
            strict(get(handlers::settings::get_setting).put(handlers::settings::update_setting)),
        )
}
