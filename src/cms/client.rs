//! HTTP client for the CMS delivery API.
//!
//! # Responsibilities
//! - Build entry URLs (space, environment, content type, pagination)
//! - Perform GETs and map failures to typed errors
//! - Decode the externally-owned JSON schema into wire types

use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::cms::types::{EntriesResponse, Entry};
use crate::config::CmsConfig;

/// Page size used when walking a full collection.
const PAGE_SIZE: usize = 100;

/// Error type for CMS requests.
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("content API rate limited the request")]
    RateLimited,
    #[error("content API returned status {0}")]
    Status(u16),
    #[error("content API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("content API response decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Client for the headless CMS delivery API.
#[derive(Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    config: CmsConfig,
}

impl CmsClient {
    pub fn new(config: CmsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch one page of entries of the given content type.
    pub async fn entries<F: DeserializeOwned>(
        &self,
        content_type: &str,
        limit: usize,
        skip: usize,
    ) -> Result<Vec<Entry<F>>, CmsError> {
        let mut url = self.entries_url(None);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("access_token", &self.config.access_token);
            pairs.append_pair("content_type", content_type);
            pairs.append_pair("limit", &limit.to_string());
            pairs.append_pair("skip", &skip.to_string());
            pairs.append_pair("order", "sys.createdAt");
        }

        let body = self.get(url).await?;
        let page: EntriesResponse<F> =
            serde_json::from_str(&body).map_err(CmsError::Decode)?;
        Ok(page.items)
    }

    /// Fetch a single entry by id.
    pub async fn entry<F: DeserializeOwned>(
        &self,
        content_type: &str,
        id: &str,
    ) -> Result<Entry<F>, CmsError> {
        let mut url = self.entries_url(Some(id));
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("access_token", &self.config.access_token);
            pairs.append_pair("content_type", content_type);
        }

        let body = self.get(url).await?;
        serde_json::from_str(&body).map_err(CmsError::Decode)
    }

    /// Walk every page of a collection until a short page is returned.
    pub async fn fetch_all<F: DeserializeOwned>(
        &self,
        content_type: &str,
    ) -> Result<Vec<Entry<F>>, CmsError> {
        let mut all = Vec::new();
        let mut skip = 0;

        loop {
            let page = self.entries::<F>(content_type, PAGE_SIZE, skip).await?;
            let fetched = page.len();
            all.extend(page);

            if fetched < PAGE_SIZE {
                return Ok(all);
            }
            skip += PAGE_SIZE;
        }
    }

    async fn get(&self, url: Url) -> Result<String, CmsError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CmsError::RateLimited);
        }
        if !status.is_success() {
            return Err(CmsError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    fn entries_url(&self, id: Option<&str>) -> Url {
        let mut url = self.config.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .expect("CMS base URL validated at startup");
            segments.pop_if_empty().extend([
                "spaces",
                self.config.space_id.as_str(),
                "environments",
                self.config.environment.as_str(),
                "entries",
            ]);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }
}
