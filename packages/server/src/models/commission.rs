use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::commission;

/// Status values a commission can move through.
pub const COMMISSION_STATUSES: &[&str] =
    &["pending", "accepted", "in_progress", "completed", "declined"];

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CommissionListQuery {
    /// Filter by status.
    #[param(example = "pending")]
    pub status: Option<String>,
}

/// Commission request as submitted from the commission form.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommissionRequest {
    #[schema(example = "Ada")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(alias = "project_type")]
    #[schema(example = "Personal Portrait")]
    pub project_type: String,
    #[schema(example = "A portrait of my grandmother in warm evening light")]
    pub vision: String,
    pub budget: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateCommissionStatusRequest {
    #[schema(example = "accepted")]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct CommissionResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub project_type: String,
    pub vision: String,
    pub budget: Option<String>,
    #[schema(example = "pending")]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<commission::Model> for CommissionResponse {
    fn from(m: commission::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            project_type: m.project_type,
            vision: m.vision,
            budget: m.budget,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
