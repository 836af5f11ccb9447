use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::model::feature::Feature;

/// Page size used when the caller does not configure one.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Upper bound on page requests per fetch, so a backend that keeps returning
/// full pages cannot hold the loop forever.
pub const MAX_PAGES: u32 = 1000;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Aha! API key is not configured")]
    MissingApiKey,

    #[error("features request for page {page} failed")]
    Page {
        page: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("stopped after {0} pages without reaching the last page")]
    PageLimit(u32),
}

pub struct AhaClient {
    base_url: String,
    auth_header: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct FeaturePage {
    #[serde(default)]
    features: Vec<Feature>,
}

impl AhaClient {
    /// Build a client for one Aha! workspace. A missing or empty API key
    /// fails here, before any request goes out. Trailing slashes on the base
    /// URL are trimmed.
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, FetchError> {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(FetchError::MissingApiKey)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: format!("Bearer {api_key}"),
            client: reqwest::Client::new(),
        })
    }

    /// Fetch every feature of a product, walking pages from 1 until a page
    /// comes back with fewer than `per_page` items. Page order and in-page
    /// order are preserved. Any failing page request aborts the whole fetch;
    /// nothing fetched so far is returned. `per_page` must be at least 1.
    pub async fn fetch_features(
        &self,
        product_id: &str,
        per_page: u32,
    ) -> Result<Vec<Feature>, FetchError> {
        let url = format!(
            "{}/api/v1/products/{}/features",
            self.base_url,
            urlencoding::encode(product_id)
        );

        let mut all_features = Vec::new();
        let mut page: u32 = 1;
        loop {
            if page > MAX_PAGES {
                return Err(FetchError::PageLimit(MAX_PAGES));
            }

            let batch = self.fetch_page(&url, page, per_page).await?;
            debug!("page {page}: {} features", batch.len());

            // A short page is the last one. A full final page costs one
            // extra request that then sees an empty page and stops.
            let last = (batch.len() as u64) < u64::from(per_page);
            all_features.extend(batch);
            if last {
                break;
            }
            page += 1;
        }

        Ok(all_features)
    }

    async fn fetch_page(
        &self,
        url: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Feature>, FetchError> {
        let resp = self
            .client
            .get(url)
            .query(&[("page", page), ("per_page", per_page)])
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Page { page, source })?
            .error_for_status()
            .map_err(|source| FetchError::Page { page, source })?;

        let body: FeaturePage = resp
            .json()
            .await
            .map_err(|source| FetchError::Page { page, source })?;

        Ok(body.features)
    }
}
