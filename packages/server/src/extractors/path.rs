use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::repository::RepoError;
use crate::services::ServiceResponse;

/// `Path<T>` that rejects with the `{data, error}` envelope.
pub struct ServicePath<T>(pub T);

impl<S, T> FromRequestParts<S> for ServicePath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ServiceResponse<()>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ServiceResponse::failure("Rejected path", RepoError::Validation(e.body_text()))
            })?;
        Ok(ServicePath(value))
    }
}

/// `Query<T>` that rejects with the `{data, error}` envelope.
pub struct ServiceQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ServiceQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceResponse<()>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ServiceResponse::failure("Rejected query", RepoError::Validation(e.body_text()))
            })?;
        Ok(ServiceQuery(value))
    }
}
