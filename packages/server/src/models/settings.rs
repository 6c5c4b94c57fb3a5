use serde::{Deserialize, Serialize};

/// Setting keys that make up the About page.
pub mod keys {
    pub const ARTIST_NAME: &str = "artist_name";
    pub const TAGLINE: &str = "tagline";
    pub const SUBTITLE: &str = "subtitle";
    pub const BIO: &str = "bio";
    pub const PROFILE_IMAGE: &str = "profile_image";
    pub const PROFILE_IMAGE_FILENAME: &str = "profile_image_filename";
    pub const EXHIBITIONS: &str = "exhibitions";
    pub const TOOLS: &str = "tools";
    pub const SOCIAL_INSTAGRAM: &str = "social_instagram";
    pub const SOCIAL_ARTSTATION: &str = "social_artstation";

    pub const ABOUT: &[&str] = &[
        ARTIST_NAME,
        TAGLINE,
        SUBTITLE,
        BIO,
        PROFILE_IMAGE,
        PROFILE_IMAGE_FILENAME,
        EXHIBITIONS,
        TOOLS,
        SOCIAL_INSTAGRAM,
        SOCIAL_ARTSTATION,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Exhibition {
    #[schema(example = "2024")]
    pub year: String,
    #[schema(example = "Neon Dreams")]
    pub name: String,
    #[schema(example = "NYC")]
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SocialLinks {
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub artstation: String,
}

/// Content of the About page, assembled from site settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AboutData {
    pub name: String,
    pub tagline: String,
    pub subtitle: String,
    pub bio: Vec<String>,
    pub profile_image: String,
    /// Bucket key of an uploaded profile image.
    #[serde(default)]
    pub profile_image_filename: Option<String>,
    pub exhibitions: Vec<Exhibition>,
    pub tools: Vec<String>,
    #[serde(default)]
    pub social: SocialLinks,
}

impl Default for AboutData {
    fn default() -> Self {
        Self {
            name: "Studio Artist".into(),
            tagline: "Visual Poetry".into(),
            subtitle: "Paintings about light, memory and the spaces in between.".into(),
            bio: vec![
                "A painter working between oil on canvas and digital brushes, drawn to \
                 quiet landscapes and the people who live in them."
                    .into(),
                "Every piece starts as a sketch on paper and ends somewhere unexpected."
                    .into(),
            ],
            profile_image: String::new(),
            profile_image_filename: None,
            exhibitions: vec![
                Exhibition {
                    year: "2024".into(),
                    name: "Neon Dreams".into(),
                    location: "NYC".into(),
                },
                Exhibition {
                    year: "2023".into(),
                    name: "Digital Soul".into(),
                    location: "London".into(),
                },
                Exhibition {
                    year: "2022".into(),
                    name: "The Void".into(),
                    location: "Online".into(),
                },
            ],
            tools: vec![
                "Procreate".into(),
                "Photoshop".into(),
                "Blender 3D".into(),
                "Traditional Oil".into(),
            ],
            social: SocialLinks::default(),
        }
    }
}

/// Request body for writing a single setting.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SettingValueRequest {
    /// Strings are stored as-is; anything else is stored JSON-encoded.
    #[schema(value_type = Object)]
    pub value: serde_json::Value,
}
