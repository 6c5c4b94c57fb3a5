use axum::extract::State;
use tracing::instrument;

use crate::extractors::json::ServiceJson;
use crate::extractors::path::{ServicePath, ServiceQuery};
use crate::models::commission::{
    CommissionListQuery, CommissionRequest, CommissionResponse, UpdateCommissionStatusRequest,
};
use crate::services::{CommissionService, ServiceResponse};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/commissions",
    tag = "Commissions",
    operation_id = "submitCommission",
    summary = "Submit a commission request",
    request_body = CommissionRequest,
    responses(
        (status = 200, description = "Stored request in `data` with status `pending`", body = CommissionResponse),
        (status = 400, description = "Validation error"),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn submit_commission(
    State(state): State<AppState>,
    ServiceJson(payload): ServiceJson<CommissionRequest>,
) -> ServiceResponse<CommissionResponse> {
    CommissionService::new(&*state.repo)
        .submit_commission_request(payload)
        .await
}

#[utoipa::path(
    get,
    path = "/commissions",
    tag = "Commissions",
    operation_id = "listCommissions",
    summary = "List commission requests",
    params(CommissionListQuery),
    responses(
        (status = 200, description = "Requests in `data`, newest first", body = Vec<CommissionResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_commissions(
    State(state): State<AppState>,
    ServiceQuery(query): ServiceQuery<CommissionListQuery>,
) -> ServiceResponse<Vec<CommissionResponse>> {
    CommissionService::new(&*state.repo)
        .fetch_commissions(query.status)
        .await
}

#[utoipa::path(
    put,
    path = "/commissions/{id}",
    tag = "Commissions",
    operation_id = "updateCommissionStatus",
    summary = "Update a commission's status",
    description = "Status must be one of `pending`, `accepted`, `in_progress`, `completed`, `declined`.",
    params(("id" = i32, Path, description = "Commission ID")),
    request_body = UpdateCommissionStatusRequest,
    responses(
        (status = 200, description = "Updated request in `data`", body = CommissionResponse),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Not found"),
        (status = 503, description = "Database not configured"),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_commission_status(
    State(state): State<AppState>,
    ServicePath(id): ServicePath<i32>,
    ServiceJson(payload): ServiceJson<UpdateCommissionStatusRequest>,
) -> ServiceResponse<CommissionResponse> {
    CommissionService::new(&*state.repo)
        .update_commission_status(id, &payload.status)
        .await
}
