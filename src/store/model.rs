//! Domain types built from CMS entries.

use serde::Serialize;

/// A certification tier (e.g. gold/silver/bronze) associated with a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standard {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
}

/// A free-form category label associated with a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
}

/// A listed producer. Slug is unique within a snapshot and doubles as the
/// URL segment and lookup key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub url: String,
    pub short_description: String,
    pub long_description: String,
    pub lat: f64,
    pub lng: f64,
    pub standard: Option<Standard>,
    pub tags: Vec<Tag>,
}

impl Location {
    pub fn standard_slug(&self) -> Option<&str> {
        self.standard.as_ref().map(|s| s.slug.as_str())
    }

    pub fn tag_slugs(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.slug.as_str())
    }
}
