//! Wire types for the CMS delivery API and its webhook payloads.
//!
//! These mirror an externally-owned schema: entries arrive as
//! `{ sys: { id }, fields: { ... } }` and collections as `{ items: [...] }`.

use serde::Deserialize;

/// Content-type identifier for location entries.
pub const CONTENT_TYPE_LOCATION: &str = "location";
/// Content-type identifier for certification-standard entries.
pub const CONTENT_TYPE_STANDARD: &str = "standard";
/// Content-type identifier for tag entries.
pub const CONTENT_TYPE_TAG: &str = "tag";

/// Webhook event topics, carried in the `X-Contentful-Topic` header.
pub mod topics {
    pub const PUBLISH: &str = "ContentManagement.Entry.publish";
    pub const UNPUBLISH: &str = "ContentManagement.Entry.unpublish";
    pub const ARCHIVE: &str = "ContentManagement.Entry.archive";
    pub const UNARCHIVE: &str = "ContentManagement.Entry.unarchive";
    pub const DELETE: &str = "ContentManagement.Entry.delete";

    /// Header naming the event topic.
    pub const HEADER: &str = "X-Contentful-Topic";
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sys {
    pub id: String,
}

/// A single CMS entry of any content type.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry<F> {
    pub sys: Sys,
    pub fields: F,
}

/// A page of entries.
#[derive(Debug, Deserialize)]
pub struct EntriesResponse<F> {
    // default = "Vec::new" keeps the derive from demanding `F: Default`
    #[serde(default = "Vec::new")]
    pub items: Vec<Entry<F>>,
}

/// A link to another entry, resolved by id against the snapshot maps.
#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub sys: LinkSys,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkSys {
    pub id: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    #[serde(rename = "lon")]
    pub lng: f64,
}

/// Fields of a `location` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFields {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub standard: Option<Link>,
    #[serde(default)]
    pub tags: Vec<Link>,
}

/// Fields shared by `standard` and `tag` entries.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyFields {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Entry-change notification body posted by the CMS.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub sys: WebhookSys,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookSys {
    pub id: String,
    #[serde(default)]
    pub content_type: Option<WebhookContentType>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookContentType {
    pub sys: LinkSys,
}

impl WebhookPayload {
    /// Content-type id of the changed entry, when the payload carries one.
    pub fn content_type_id(&self) -> Option<&str> {
        self.sys
            .content_type
            .as_ref()
            .map(|ct| ct.sys.id.as_str())
    }
}
