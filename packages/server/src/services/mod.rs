//! Service layer between HTTP handlers and the gallery repository.
//!
//! Service operations never fail outright: every outcome, including backend
//! errors, is folded into a [`ServiceResponse`].

pub mod artwork;
pub mod commission;
pub mod contact;
pub mod settings;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::repository::RepoError;

pub use artwork::ArtworkService;
pub use commission::CommissionService;
pub use contact::ContactService;
pub use settings::SettingsService;

/// `{data, error}` envelope returned by every service operation.
#[derive(Debug, Serialize)]
pub struct ServiceResponse<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T> ServiceResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            status: StatusCode::OK,
        }
    }

    /// A failed operation with no data. `context` is only logged.
    pub fn failure(context: &str, err: RepoError) -> Self {
        Self::build(None, context, err)
    }

    /// A failed operation that still carries fallback data.
    pub fn failure_with(data: T, context: &str, err: RepoError) -> Self {
        Self::build(Some(data), context, err)
    }

    fn build(data: Option<T>, context: &str, err: RepoError) -> Self {
        let status = match &err {
            RepoError::NotFound => StatusCode::NOT_FOUND,
            RepoError::Validation(_) => StatusCode::BAD_REQUEST,
            RepoError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            RepoError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match &err {
            RepoError::Database(e) => tracing::error!(error = %e, "{}", context),
            other => tracing::debug!(error = %other, "{}", context),
        }
        Self {
            data,
            error: Some(err.to_string()),
            status,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
