//! Headless CMS delivery-API subsystem.
//!
//! # Data Flow
//! ```text
//! store refresh / webhook
//!     → client.rs (GET entries, decode JSON)
//!     → types.rs (wire shapes: sys/fields entries, webhook payload)
//!     → store builds domain types from entries
//! ```
//!
//! # Design Decisions
//! - The wire schema is externally owned (Contentful-compatible); wire types
//!   live here and never leak past the store
//! - No retry policy: the periodic poll is the de facto retry mechanism,
//!   and callers keep stale data on failure
//! - Rate limiting (429) is surfaced as its own error variant

pub mod client;
pub mod types;

pub use client::{CmsClient, CmsError};
pub use types::{
    topics, Entry, EntriesResponse, LocationFields, TaxonomyFields, WebhookPayload,
    CONTENT_TYPE_LOCATION, CONTENT_TYPE_STANDARD, CONTENT_TYPE_TAG,
};
