use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::entity::{artwork, commission, contact, site_setting};

use super::{
    ArtworkChanges, ArtworkFilter, GalleryRepository, NewArtwork, NewCommission, NewContact,
    RepoError,
};

/// PostgreSQL-backed repository.
#[derive(Clone)]
pub struct DatabaseRepository {
    db: DatabaseConnection,
}

impl DatabaseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GalleryRepository for DatabaseRepository {
    async fn list_artworks(&self, filter: &ArtworkFilter) -> Result<Vec<artwork::Model>, RepoError> {
        let mut query = artwork::Entity::find();
        if let Some(category) = &filter.category {
            query = query.filter(artwork::Column::Category.eq(category.as_str()));
        }
        if filter.featured_only {
            query = query.filter(artwork::Column::IsFeatured.eq(true));
        }
        query = query.order_by_desc(artwork::Column::CreatedAt);
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }
        Ok(query.all(&self.db).await?)
    }

    async fn find_artwork(&self, id: i32) -> Result<Option<artwork::Model>, RepoError> {
        Ok(artwork::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn artwork_categories(&self) -> Result<Vec<String>, RepoError> {
        let categories = artwork::Entity::find()
            .select_only()
            .column(artwork::Column::Category)
            .order_by_asc(artwork::Column::Id)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;
        Ok(categories)
    }

    async fn create_artwork(&self, input: NewArtwork) -> Result<artwork::Model, RepoError> {
        let now = Utc::now();
        let model = artwork::ActiveModel {
            title: Set(input.title),
            category: Set(input.category),
            year: Set(input.year),
            description: Set(input.description),
            price: Set(input.price),
            is_featured: Set(input.is_featured),
            is_sold: Set(input.is_sold),
            image_url: Set(input.image_url),
            image_filename: Set(input.image_filename),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn update_artwork(
        &self,
        id: i32,
        changes: ArtworkChanges,
    ) -> Result<artwork::Model, RepoError> {
        let existing = artwork::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound)?;

        let mut active: artwork::ActiveModel = existing.into();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(category) = changes.category {
            active.category = Set(category);
        }
        if let Some(year) = changes.year {
            active.year = Set(year);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(is_featured) = changes.is_featured {
            active.is_featured = Set(is_featured);
        }
        if let Some(is_sold) = changes.is_sold {
            active.is_sold = Set(is_sold);
        }
        if let Some(image_url) = changes.image_url {
            active.image_url = Set(image_url);
        }
        if let Some(image_filename) = changes.image_filename {
            active.image_filename = Set(image_filename);
        }
        active.updated_at = Set(Utc::now());

        Ok(active.update(&self.db).await?)
    }

    async fn delete_artwork(&self, id: i32) -> Result<bool, RepoError> {
        let result = artwork::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn insert_contact(&self, input: NewContact) -> Result<contact::Model, RepoError> {
        let model = contact::ActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            project_type: Set(input.project_type),
            budget: Set(input.budget),
            message: Set(input.message),
            is_read: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn list_contacts(&self, unread_only: bool) -> Result<Vec<contact::Model>, RepoError> {
        let mut query = contact::Entity::find();
        if unread_only {
            query = query.filter(contact::Column::IsRead.eq(false));
        }
        Ok(query
            .order_by_desc(contact::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn mark_contact_read(&self, id: i32) -> Result<contact::Model, RepoError> {
        let existing = contact::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound)?;
        if existing.is_read {
            return Ok(existing);
        }

        let mut active: contact::ActiveModel = existing.into();
        active.is_read = Set(true);
        Ok(active.update(&self.db).await?)
    }

    async fn insert_commission(
        &self,
        input: NewCommission,
    ) -> Result<commission::Model, RepoError> {
        let model = commission::ActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            project_type: Set(input.project_type),
            vision: Set(input.vision),
            budget: Set(input.budget),
            status: Set("pending".into()),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn list_commissions(
        &self,
        status: Option<&str>,
    ) -> Result<Vec<commission::Model>, RepoError> {
        let mut query = commission::Entity::find();
        if let Some(status) = status {
            query = query.filter(commission::Column::Status.eq(status));
        }
        Ok(query
            .order_by_desc(commission::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn update_commission_status(
        &self,
        id: i32,
        status: &str,
    ) -> Result<commission::Model, RepoError> {
        let existing = commission::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound)?;

        let mut active: commission::ActiveModel = existing.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(Some(Utc::now()));
        Ok(active.update(&self.db).await?)
    }

    async fn settings(&self, keys: &[&str]) -> Result<Vec<site_setting::Model>, RepoError> {
        Ok(site_setting::Entity::find()
            .filter(site_setting::Column::Key.is_in(keys.iter().copied()))
            .all(&self.db)
            .await?)
    }

    async fn upsert_settings(&self, entries: Vec<(String, String)>) -> Result<(), RepoError> {
        let now = Utc::now();
        let txn = self.db.begin().await?;
        for (key, value) in entries {
            let model = site_setting::ActiveModel {
                key: Set(key),
                value: Set(value),
                updated_at: Set(now),
            };
            site_setting::Entity::insert(model)
                .on_conflict(
                    OnConflict::column(site_setting::Column::Key)
                        .update_columns([
                            site_setting::Column::Value,
                            site_setting::Column::UpdatedAt,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await?;
        }
        txn.commit().await?;
        Ok(())
    }
}
