use axum::extract::State;
use serde_json::Value;
use tracing::instrument;

use crate::extractors::json::ServiceJson;
use crate::extractors::path::ServicePath;
use crate::models::settings::{AboutData, SettingValueRequest};
use crate::services::{ServiceResponse, SettingsService};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/settings/about",
    tag = "Settings",
    operation_id = "getAbout",
    summary = "Get About page content",
    description = "Missing settings fall back to defaults. On backend failure `data` still holds the defaults.",
    responses(
        (status = 200, description = "About data in `data`", body = AboutData),
    ),
)]
#[instrument(skip(state))]
pub async fn get_about(State(state): State<AppState>) -> ServiceResponse<AboutData> {
    SettingsService::new(&*state.repo).fetch_about_data().await
}

#[utoipa::path(
    put,
    path = "/settings/about",
    tag = "Settings",
    operation_id = "updateAbout",
    summary = "Replace About page content",
    request_body = AboutData,
    responses(
        (status = 200, description = "Saved about data in `data`", body = AboutData),
        (status = 503, description = "Database not configured"),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_about(
    State(state): State<AppState>,
    ServiceJson(payload): ServiceJson<AboutData>,
) -> ServiceResponse<AboutData> {
    SettingsService::new(&*state.repo)
        .update_about_data(payload)
        .await
}

#[utoipa::path(
    get,
    path = "/settings/{key}",
    tag = "Settings",
    operation_id = "getSetting",
    summary = "Get a single setting",
    params(("key" = String, Path, description = "Setting key")),
    responses(
        (status = 200, description = "Parsed value in `data`"),
        (status = 404, description = "Not found"),
    ),
)]
#[instrument(skip(state))]
pub async fn get_setting(
    State(state): State<AppState>,
    ServicePath(key): ServicePath<String>,
) -> ServiceResponse<Value> {
    SettingsService::new(&*state.repo).get_setting(&key).await
}

#[utoipa::path(
    put,
    path = "/settings/{key}",
    tag = "Settings",
    operation_id = "updateSetting",
    summary = "Write a single setting",
    params(("key" = String, Path, description = "Setting key")),
    request_body = SettingValueRequest,
    responses(
        (status = 200, description = "Stored value in `data`"),
        (status = 400, description = "Invalid key"),
        (status = 503, description = "Database not configured"),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_setting(
    State(state): State<AppState>,
    ServicePath(key): ServicePath<String>,
    ServiceJson(payload): ServiceJson<SettingValueRequest>,
) -> ServiceResponse<Value> {
    SettingsService::new(&*state.repo)
        .update_setting(&key, payload.value)
        .await
}
