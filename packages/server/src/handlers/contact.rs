use axum::extract::State;
use tracing::instrument;

use crate::extractors::json::ServiceJson;
use crate::extractors::path::{ServicePath, ServiceQuery};
use crate::models::contact::{ContactListQuery, ContactRequest, ContactResponse};
use crate::services::{ContactService, ServiceResponse};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/contacts",
    tag = "Contacts",
    operation_id = "submitContact",
    summary = "Submit the contact form",
    description = "`vision` is used as the message when present, otherwise `message`.",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Stored message in `data`", body = ContactResponse),
        (status = 400, description = "Validation error"),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn submit_contact(
    State(state): State<AppState>,
    ServiceJson(payload): ServiceJson<ContactRequest>,
) -> ServiceResponse<ContactResponse> {
    ContactService::new(&*state.repo)
        .submit_contact_form(payload)
        .await
}

#[utoipa::path(
    get,
    path = "/contacts",
    tag = "Contacts",
    operation_id = "listContacts",
    summary = "List contact messages",
    params(ContactListQuery),
    responses(
        (status = 200, description = "Messages in `data`, newest first", body = Vec<ContactResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_contacts(
    State(state): State<AppState>,
    ServiceQuery(query): ServiceQuery<ContactListQuery>,
) -> ServiceResponse<Vec<ContactResponse>> {
    ContactService::new(&*state.repo)
        .fetch_contacts(query.unread_only.unwrap_or(false))
        .await
}

#[utoipa::path(
    post,
    path = "/contacts/{id}/read",
    tag = "Contacts",
    operation_id = "markContactRead",
    summary = "Mark a contact message as read",
    params(("id" = i32, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Updated message in `data`", body = ContactResponse),
        (status = 404, description = "Not found"),
        (status = 503, description = "Database not configured"),
    ),
)]
#[instrument(skip(state))]
pub async fn mark_contact_read(
    State(state): State<AppState>,
    ServicePath(id): ServicePath<i32>,
) -> ServiceResponse<ContactResponse> {
    ContactService::new(&*state.repo)
        .mark_contact_as_read(id)
        .await
}
