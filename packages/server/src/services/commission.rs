use crate::models::commission::{COMMISSION_STATUSES, CommissionRequest, CommissionResponse};
use crate::models::shared::{non_blank, validate_sender};
use crate::repository::{GalleryRepository, NewCommission, RepoError};

use super::ServiceResponse;

pub struct CommissionService<'a> {
    repo: &'a dyn GalleryRepository,
}

impl<'a> CommissionService<'a> {
    pub fn new(repo: &'a dyn GalleryRepository) -> Self {
        Self { repo }
    }

    /// Store a commission request with status `pending`.
    pub async fn submit_commission_request(
        &self,
        req: CommissionRequest,
    ) -> ServiceResponse<CommissionResponse> {
        if let Err(msg) = validate_sender(&req.name, &req.email) {
            return ServiceResponse::failure("Invalid commission request", RepoError::Validation(msg));
        }
        let Some(project_type) = non_blank(Some(req.project_type)) else {
            return ServiceResponse::failure(
                "Invalid commission request",
                RepoError::Validation("Project type is required".into()),
            );
        };
        let Some(vision) = non_blank(Some(req.vision)) else {
            return ServiceResponse::failure(
                "Invalid commission request",
                RepoError::Validation("Vision is required".into()),
            );
        };

        let input = NewCommission {
            name: req.name.trim().to_string(),
            email: req.email.trim().to_string(),
            project_type,
            vision,
            budget: non_blank(req.budget),
        };

        match self.repo.insert_commission(input).await {
            Ok(model) => {
                tracing::info!(id = model.id, "Commission request received");
                ServiceResponse::ok(model.into())
            }
            Err(e) => ServiceResponse::failure("Error submitting commission request", e),
        }
    }

    pub async fn fetch_commissions(
        &self,
        status: Option<String>,
    ) -> ServiceResponse<Vec<CommissionResponse>> {
        let status = non_blank(status);
        match self.repo.list_commissions(status.as_deref()).await {
            Ok(rows) => ServiceResponse::ok(rows.into_iter().map(Into::into).collect()),
            Err(e) => ServiceResponse::failure("Error fetching commissions", e),
        }
    }

    pub async fn update_commission_status(
        &self,
        id: i32,
        status: &str,
    ) -> ServiceResponse<CommissionResponse> {
        let status = status.trim();
        if !COMMISSION_STATUSES.contains(&status) {
            return ServiceResponse::failure(
                "Invalid commission status",
                RepoError::Validation(format!(
                    "Invalid status. Allowed: {}",
                    COMMISSION_STATUSES.join(", ")
                )),
            );
        }

        match self.repo.update_commission_status(id, status).await {
            Ok(model) => ServiceResponse::ok(model.into()),
            Err(e) => ServiceResponse::failure("Error updating commission status", e),
        }
    }
}
