use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A gallery piece. `image_filename` names the object key in the bucket.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "artwork")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    #[sea_orm(indexed)]
    pub category: String,

    pub year: i32,

    #[sea_orm(column_type = "Text")]
    pub description: Option<String>,

    pub price: Option<f64>,

    #[sea_orm(default_value = false, indexed)]
    pub is_featured: bool,

    #[sea_orm(default_value = false)]
    pub is_sold: bool,

    pub image_url: Option<String>,

    pub image_filename: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
