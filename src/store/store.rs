//! The shared location store: an atomically-swapped snapshot plus the CMS
//! client that feeds it.

use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;

use crate::cms::types::{LocationFields, TaxonomyFields};
use crate::cms::{
    topics, CmsClient, CmsError, Entry, WebhookPayload, CONTENT_TYPE_LOCATION,
    CONTENT_TYPE_STANDARD, CONTENT_TYPE_TAG,
};
use crate::store::model::Location;
use crate::store::snapshot::Snapshot;

/// Error type for webhook application.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("unknown webhook topic: {0}")]
    UnknownTopic(String),
    #[error("webhook payload carries no content type")]
    MissingContentType,
    #[error("unknown content type: {0}")]
    UnknownContentType(String),
    #[error(transparent)]
    Cms(#[from] CmsError),
}

/// Shared, swap-on-write store of the current content snapshot.
pub struct LocationStore {
    snapshot: ArcSwap<Snapshot>,
    client: CmsClient,
}

impl LocationStore {
    pub fn new(client: CmsClient) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(Snapshot::default()),
            client,
        }
    }

    /// The current snapshot; immutable once published.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.load_full()
    }

    pub fn get(&self, slug: &str) -> Option<Location> {
        self.snapshot.load().get(slug).cloned()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Location> {
        self.snapshot.load().get_by_id(id).cloned()
    }

    pub fn filter(&self, standards: &[String], tags: &[String]) -> Vec<Location> {
        self.snapshot.load().filter(standards, tags)
    }

    /// Fetch standards, tags and locations (in that order; locations link to
    /// the other two) and publish a rebuilt snapshot. A failed or empty
    /// fetch leaves that one collection stale.
    pub async fn refresh(&self) {
        let standards = self
            .fetch_collection::<TaxonomyFields>(CONTENT_TYPE_STANDARD)
            .await;
        let tags = self.fetch_collection::<TaxonomyFields>(CONTENT_TYPE_TAG).await;
        let locations = self
            .fetch_collection::<LocationFields>(CONTENT_TYPE_LOCATION)
            .await;

        let prev = self.snapshot.load_full();
        let next = Snapshot::rebuilt(&prev, standards, tags, locations);

        tracing::debug!(
            locations = next.len(),
            standards = next.standards_sorted().len(),
            tags = next.tags_sorted().len(),
            "Snapshot refreshed"
        );

        self.snapshot.store(Arc::new(next));
    }

    /// Apply a single entry-change event: publish/unarchive fetches and
    /// upserts the affected entry, unpublish/archive/delete removes it.
    pub async fn apply_webhook(
        &self,
        topic: &str,
        payload: &WebhookPayload,
    ) -> Result<(), WebhookError> {
        match topic {
            topics::PUBLISH | topics::UNARCHIVE => self.upsert_entry(payload).await,
            topics::UNPUBLISH | topics::ARCHIVE | topics::DELETE => {
                let prev = self.snapshot.load_full();
                self.snapshot.store(Arc::new(prev.without_entry(&payload.sys.id)));
                tracing::info!(id = %payload.sys.id, topic, "Entry removed via webhook");
                Ok(())
            }
            other => Err(WebhookError::UnknownTopic(other.to_string())),
        }
    }

    async fn upsert_entry(&self, payload: &WebhookPayload) -> Result<(), WebhookError> {
        let content_type = payload
            .content_type_id()
            .ok_or(WebhookError::MissingContentType)?;
        let id = payload.sys.id.as_str();

        let prev = self.snapshot.load_full();
        let next = match content_type {
            CONTENT_TYPE_LOCATION => {
                let entry: Entry<LocationFields> =
                    self.client.entry(content_type, id).await?;
                prev.with_location(entry)
            }
            CONTENT_TYPE_STANDARD => {
                let entry: Entry<TaxonomyFields> =
                    self.client.entry(content_type, id).await?;
                prev.with_standard(entry)
            }
            CONTENT_TYPE_TAG => {
                let entry: Entry<TaxonomyFields> =
                    self.client.entry(content_type, id).await?;
                prev.with_tag(entry)
            }
            other => return Err(WebhookError::UnknownContentType(other.to_string())),
        };

        self.snapshot.store(Arc::new(next));
        tracing::info!(id, content_type, "Entry upserted via webhook");
        Ok(())
    }

    async fn fetch_collection<F: serde::de::DeserializeOwned>(
        &self,
        content_type: &str,
    ) -> Option<Vec<Entry<F>>> {
        match self.client.fetch_all::<F>(content_type).await {
            Ok(entries) => Some(entries),
            Err(error) => {
                tracing::warn!(content_type, %error, "Collection fetch failed, keeping stale data");
                None
            }
        }
    }
}
