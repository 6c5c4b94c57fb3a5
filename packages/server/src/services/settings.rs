use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::settings::{AboutData, keys};
use crate::repository::{GalleryRepository, RepoError};

use super::ServiceResponse;

const MAX_KEY_LEN: usize = 128;

pub struct SettingsService<'a> {
    repo: &'a dyn GalleryRepository,
}

/// Stored values are JSON when they parse as JSON, plain strings otherwise.
fn parse_stored(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}

/// Non-empty textual form of a scalar setting.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_list<T: DeserializeOwned>(value: &Value) -> Option<Vec<T>> {
    match value {
        Value::Array(_) => serde_json::from_value(value.clone()).ok(),
        _ => None,
    }
}

/// Overlay stored settings onto the defaults, field by field.
fn merge_about(stored: HashMap<String, Value>) -> AboutData {
    let mut about = AboutData::default();
    let text = |key: &str, target: &mut String| {
        if let Some(v) = stored.get(key).and_then(as_text) {
            *target = v;
        }
    };

    text(keys::ARTIST_NAME, &mut about.name);
    text(keys::TAGLINE, &mut about.tagline);
    text(keys::SUBTITLE, &mut about.subtitle);
    text(keys::PROFILE_IMAGE, &mut about.profile_image);
    text(keys::SOCIAL_INSTAGRAM, &mut about.social.instagram);
    text(keys::SOCIAL_ARTSTATION, &mut about.social.artstation);

    if let Some(v) = stored.get(keys::PROFILE_IMAGE_FILENAME) {
        about.profile_image_filename = as_text(v);
    }
    if let Some(bio) = stored.get(keys::BIO).and_then(as_list) {
        about.bio = bio;
    } else if let Some(single) = stored.get(keys::BIO).and_then(as_text) {
        about.bio = vec![single];
    }
    if let Some(exhibitions) = stored.get(keys::EXHIBITIONS).and_then(as_list) {
        about.exhibitions = exhibitions;
    }
    if let Some(tools) = stored.get(keys::TOOLS).and_then(as_list) {
        about.tools = tools;
    }

    about
}

fn about_entries(about: &AboutData) -> Result<Vec<(String, String)>, serde_json::Error> {
    let entries = [
        (keys::ARTIST_NAME, about.name.clone()),
        (keys::TAGLINE, about.tagline.clone()),
        (keys::SUBTITLE, about.subtitle.clone()),
        (keys::BIO, serde_json::to_string(&about.bio)?),
        (keys::PROFILE_IMAGE, about.profile_image.clone()),
        (
            keys::PROFILE_IMAGE_FILENAME,
            about.profile_image_filename.clone().unwrap_or_default(),
        ),
        (keys::EXHIBITIONS, serde_json::to_string(&about.exhibitions)?),
        (keys::TOOLS, serde_json::to_string(&about.tools)?),
        (keys::SOCIAL_INSTAGRAM, about.social.instagram.clone()),
        (keys::SOCIAL_ARTSTATION, about.social.artstation.clone()),
    ];
    Ok(entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect())
}

fn validate_key(key: &str) -> Result<(), RepoError> {
    if key.is_empty() || key.len() > MAX_KEY_LEN {
        return Err(RepoError::Validation(format!(
            "Setting key must be 1-{MAX_KEY_LEN} characters"
        )));
    }
    Ok(())
}

impl<'a> SettingsService<'a> {
    pub fn new(repo: &'a dyn GalleryRepository) -> Self {
        Self { repo }
    }

    /// About page content. Missing or empty settings fall back to defaults,
    /// and a backend failure still returns the defaults alongside the error.
    pub async fn fetch_about_data(&self) -> ServiceResponse<AboutData> {
        match self.repo.settings(keys::ABOUT).await {
            Ok(rows) => {
                let stored = rows
                    .into_iter()
                    .map(|row| (row.key, parse_stored(row.value)))
                    .collect();
                ServiceResponse::ok(merge_about(stored))
            }
            Err(e) => {
                ServiceResponse::failure_with(AboutData::default(), "Error fetching about data", e)
            }
        }
    }

    pub async fn update_about_data(&self, about: AboutData) -> ServiceResponse<AboutData> {
        let entries = match about_entries(&about) {
            Ok(entries) => entries,
            Err(e) => {
                return ServiceResponse::failure(
                    "Error encoding about data",
                    RepoError::Validation(e.to_string()),
                );
            }
        };

        match self.repo.upsert_settings(entries).await {
            Ok(()) => {
                tracing::info!("About data updated");
                ServiceResponse::ok(about)
            }
            Err(e) => ServiceResponse::failure("Error updating about data", e),
        }
    }

    pub async fn get_setting(&self, key: &str) -> ServiceResponse<Value> {
        if let Err(e) = validate_key(key) {
            return ServiceResponse::failure("Invalid setting key", e);
        }
        match self.repo.settings(&[key]).await {
            Ok(rows) => match rows.into_iter().find(|row| row.key == key) {
                Some(row) => ServiceResponse::ok(parse_stored(row.value)),
                None => ServiceResponse::failure("Error fetching setting", RepoError::NotFound),
            },
            Err(e) => ServiceResponse::failure("Error fetching setting", e),
        }
    }

    /// Strings are stored verbatim; any other JSON value is stored encoded.
    pub async fn update_setting(&self, key: &str, value: Value) -> ServiceResponse<Value> {
        if let Err(e) = validate_key(key) {
            return ServiceResponse::failure("Invalid setting key", e);
        }
        let stored = match &value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        match self.repo.upsert_settings(vec![(key.to_string(), stored)]).await {
            Ok(()) => ServiceResponse::ok(value),
            Err(e) => ServiceResponse::failure("Error updating setting", e),
        }
    }
}
