use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Message left through the contact form.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub email: String,
    pub project_type: Option<String>,
    pub budget: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub message: String,

    #[sea_orm(default_value = false, indexed)]
    pub is_read: bool,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
