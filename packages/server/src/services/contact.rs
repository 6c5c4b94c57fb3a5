use crate::models::contact::{ContactRequest, ContactResponse};
use crate::models::shared::{non_blank, validate_sender};
use crate::repository::{GalleryRepository, NewContact, RepoError};

use super::ServiceResponse;

pub struct ContactService<'a> {
    repo: &'a dyn GalleryRepository,
}

impl<'a> ContactService<'a> {
    pub fn new(repo: &'a dyn GalleryRepository) -> Self {
        Self { repo }
    }

    /// Store a contact form submission. The commission-style `vision` field
    /// takes precedence over `message`.
    pub async fn submit_contact_form(
        &self,
        req: ContactRequest,
    ) -> ServiceResponse<ContactResponse> {
        if let Err(msg) = validate_sender(&req.name, &req.email) {
            return ServiceResponse::failure("Invalid contact form", RepoError::Validation(msg));
        }
        let Some(message) = non_blank(req.vision).or_else(|| non_blank(req.message)) else {
            return ServiceResponse::failure(
                "Invalid contact form",
                RepoError::Validation("Message is required".into()),
            );
        };

        let input = NewContact {
            name: req.name.trim().to_string(),
            email: req.email.trim().to_string(),
            project_type: non_blank(req.project_type),
            budget: non_blank(req.budget),
            message,
        };

        match self.repo.insert_contact(input).await {
            Ok(model) => ServiceResponse::ok(model.into()),
            Err(e) => ServiceResponse::failure("Error submitting contact form", e),
        }
    }

    pub async fn fetch_contacts(&self, unread_only: bool) -> ServiceResponse<Vec<ContactResponse>> {
        match self.repo.list_contacts(unread_only).await {
            Ok(rows) => ServiceResponse::ok(rows.into_iter().map(Into::into).collect()),
            Err(e) => ServiceResponse::failure("Error fetching contacts", e),
        }
    }

    pub async fn mark_contact_as_read(&self, id: i32) -> ServiceResponse<ContactResponse> {
        match self.repo.mark_contact_read(id).await {
            Ok(model) => ServiceResponse::ok(model.into()),
            Err(e) => ServiceResponse::failure("Error marking contact as read", e),
        }
    }
}
