use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::contact;

/// Query parameters for listing contact messages.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContactListQuery {
    /// Only return unread messages.
    #[param(example = true)]
    pub unread_only: Option<bool>,
}

/// Contact form submission. `vision` takes precedence over `message`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[schema(example = "Ada")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(alias = "project_type")]
    #[schema(example = "Personal Portrait")]
    pub project_type: Option<String>,
    pub budget: Option<String>,
    pub vision: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ContactResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub project_type: Option<String>,
    pub budget: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<contact::Model> for ContactResponse {
    fn from(m: contact::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            project_type: m.project_type,
            budget: m.budget,
            message: m.message,
            is_read: m.is_read,
            created_at: m.created_at,
        }
    }
}
