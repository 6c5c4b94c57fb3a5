use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::entity::{artwork, commission, contact, site_setting};

use super::{
    ArtworkChanges, ArtworkFilter, GalleryRepository, NewArtwork, NewCommission, NewContact,
    RepoError,
};

/// Fixture-backed repository used when no database is configured.
///
/// Reads come from a fixed set of artworks. Admin writes fail with
/// [`RepoError::NotConfigured`]; visitor submissions are acknowledged
/// without being stored.
pub struct DemoRepository {
    artworks: Vec<artwork::Model>,
    next_id: AtomicI32,
}

impl Default for DemoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoRepository {
    pub fn new() -> Self {
        Self {
            artworks: demo_artworks(),
            next_id: AtomicI32::new(1),
        }
    }

    fn next_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

fn fixture_time(year: i32, month: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

fn demo_artworks() -> Vec<artwork::Model> {
    let pieces = [
        (1, "Ethereal Dreams", "abstract", 2024, "A journey through color and emotion", 850.0, false, true),
        (2, "Golden Hour", "landscapes", 2024, "Capturing the magic of sunset", 1200.0, false, true),
        (3, "Soul Portrait", "portraits", 2023, "The essence of inner beauty", 950.0, true, false),
        (4, "Abstract Flow", "abstract", 2024, "Movement in stillness", 750.0, false, true),
        (5, "Mountain Serenity", "landscapes", 2024, "Peace in the peaks", 1100.0, false, false),
        (6, "Gentle Spirit", "portraits", 2023, "A window to the soul", 900.0, false, false),
    ];

    pieces
        .into_iter()
        .map(
            |(id, title, category, year, description, price, is_sold, is_featured)| {
                let created = fixture_time(year, 1);
                artwork::Model {
                    id,
                    title: title.into(),
                    category: category.into(),
                    year,
                    description: Some(description.into()),
                    price: Some(price),
                    is_featured,
                    is_sold,
                    image_url: None,
                    image_filename: None,
                    created_at: created,
                    updated_at: created,
                }
            },
        )
        .collect()
}

#[async_trait]
impl GalleryRepository for DemoRepository {
    async fn list_artworks(&self, filter: &ArtworkFilter) -> Result<Vec<artwork::Model>, RepoError> {
        let matching = self
            .artworks
            .iter()
            .filter(|a| filter.category.as_ref().is_none_or(|c| &a.category == c))
            .filter(|a| !filter.featured_only || a.is_featured)
            .cloned();

        Ok(match filter.limit {
            Some(limit) => matching.take(limit as usize).collect(),
            None => matching.collect(),
        })
    }

    async fn find_artwork(&self, id: i32) -> Result<Option<artwork::Model>, RepoError> {
        Ok(self.artworks.iter().find(|a| a.id == id).cloned())
    }

    async fn artwork_categories(&self) -> Result<Vec<String>, RepoError> {
        Ok(self.artworks.iter().map(|a| a.category.clone()).collect())
    }

    async fn create_artwork(&self, _input: NewArtwork) -> Result<artwork::Model, RepoError> {
        Err(RepoError::NotConfigured)
    }

    async fn update_artwork(
        &self,
        _id: i32,
        _changes: ArtworkChanges,
    ) -> Result<artwork::Model, RepoError> {
        Err(RepoError::NotConfigured)
    }

    async fn delete_artwork(&self, _id: i32) -> Result<bool, RepoError> {
        Err(RepoError::NotConfigured)
    }

    async fn insert_contact(&self, input: NewContact) -> Result<contact::Model, RepoError> {
        tracing::info!(name = %input.name, "Demo mode: contact form received");
        Ok(contact::Model {
            id: self.next_id(),
            name: input.name,
            email: input.email,
            project_type: input.project_type,
            budget: input.budget,
            message: input.message,
            is_read: false,
            created_at: Utc::now(),
        })
    }

    async fn list_contacts(&self, _unread_only: bool) -> Result<Vec<contact::Model>, RepoError> {
        Ok(Vec::new())
    }

    async fn mark_contact_read(&self, _id: i32) -> Result<contact::Model, RepoError> {
        Err(RepoError::NotConfigured)
    }

    async fn insert_commission(
        &self,
        input: NewCommission,
    ) -> Result<commission::Model, RepoError> {
        tracing::info!(name = %input.name, "Demo mode: commission request received");
        Ok(commission::Model {
            id: self.next_id(),
            name: input.name,
            email: input.email,
            project_type: input.project_type,
            vision: input.vision,
            budget: input.budget,
            status: "pending".into(),
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    async fn list_commissions(
        &self,
        _status: Option<&str>,
    ) -> Result<Vec<commission::Model>, RepoError> {
        Ok(Vec::new())
    }

    async fn update_commission_status(
        &self,
        _id: i32,
        _status: &str,
    ) -> Result<commission::Model, RepoError> {
        Err(RepoError::NotConfigured)
    }

    async fn settings(&self, _keys: &[&str]) -> Result<Vec<site_setting::Model>, RepoError> {
        Ok(Vec::new())
    }

    async fn upsert_settings(&self, _entries: Vec<(String, String)>) -> Result<(), RepoError> {
        Err(RepoError::NotConfigured)
    }
}
