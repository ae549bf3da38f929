//! Models for the three content types exposed by the remote API.
//!
//! Wisata, kuliner and acara records are structurally identical, so one
//! `Entity` struct plus an `EntityKind` discriminant covers all of them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Wisata,
    Kuliner,
    Acara,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Wisata, EntityKind::Kuliner, EntityKind::Acara];

    /// Path segment used by the remote API.
    pub fn api_path(self) -> &'static str {
        match self {
            EntityKind::Wisata => "wisata",
            EntityKind::Kuliner => "kuliner",
            EntityKind::Acara => "event",
        }
    }

    /// Public route for the list page; the detail page appends `/{id}`.
    pub fn route_path(self) -> &'static str {
        match self {
            EntityKind::Wisata => "/tempat-wisata",
            EntityKind::Kuliner => "/kuliner",
            EntityKind::Acara => "/acara",
        }
    }

    /// URL segment used under `/adminDashboard`.
    pub fn slug(self) -> &'static str {
        match self {
            EntityKind::Wisata => "tempat-wisata",
            EntityKind::Kuliner => "kuliner",
            EntityKind::Acara => "acara",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Wisata => "Tempat Wisata",
            EntityKind::Kuliner => "Kuliner",
            EntityKind::Acara => "Acara",
        }
    }
}

/// One tourism/culinary/event record, with image paths already absolutized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub image: Vec<String>,
}

/// Wire shape of a record. The `image` field arrives as a JSON-encoded
/// string on well-behaved responses, but older rows return a bare array.
#[derive(Debug, Deserialize)]
pub struct RawEntity {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub image: Value,
}

impl Entity {
    pub fn from_raw(raw: RawEntity, base_url: &str) -> Self {
        let image = parse_image_field(&raw.image)
            .into_iter()
            .map(|path| absolutize(&path, base_url))
            .collect();
        Self {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            location: raw.location,
            date: raw.date,
            image,
        }
    }

    pub fn fields(&self) -> EntityFields {
        EntityFields {
            title: self.title.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            date: self.date.clone(),
        }
    }
}

/// Decode the `image` column. Unparsable garbage degrades to an empty list.
pub fn parse_image_field(raw: &Value) -> Vec<String> {
    match raw {
        Value::String(encoded) => serde_json::from_str::<Vec<String>>(encoded).unwrap_or_default(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Prefix relative paths with the configured base URL; absolute URLs pass
/// through unmodified.
pub fn absolutize(path: &str, base_url: &str) -> String {
    if path.starts_with("http") {
        path.to_string()
    } else {
        format!("{base_url}{path}")
    }
}

/// The four editable text fields of every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityFields {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: String,
}

/// A locally selected image, ready to be forwarded upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Image portion of a create/update request. Either freshly selected files
/// or the record's existing remote references, never a mix of both.
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePayload {
    Files(Vec<UploadFile>),
    Remote(Vec<String>),
}
