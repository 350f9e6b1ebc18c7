//! HTTP catalog backed by the svgl.app REST API

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::catalog::{filename_from_location, Catalog, IconQuery};
use crate::config::ApiConfig;
use crate::error::{CatalogError, CatalogResult, ConfigError, Result};
use crate::types::{ApiCategory, ApiIcon, CategoryRecord, IconRecord};

/// Catalog client speaking to the remote service
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    /// Create a client from API configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the timeout is malformed or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout()? {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| ConfigError::InvalidValue {
            field: "api".to_string(),
            reason: format!("failed to create HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an icon listing
    pub fn icons_url(&self, query: &IconQuery) -> String {
        format!("{}{}", self.base_url, query.path())
    }

    /// Full URL for the markup of `asset_location`
    pub fn markup_url(&self, asset_location: &str) -> CatalogResult<String> {
        let filename = filename_from_location(asset_location)?;
        Ok(format!(
            "{}/svg/{}",
            self.base_url,
            urlencoding::encode(filename)
        ))
    }

    /// GET a listing endpoint, treating 404 as "no records"
    async fn get_listing<T: DeserializeOwned>(&self, url: &str) -> CatalogResult<Vec<T>> {
        tracing::debug!(url, "Fetching listing");

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::warn!(url, error = %e, "Listing request failed");
            CatalogError::from(e)
        })?;

        let status = response.status();
        match listing_status(status) {
            ListingStatus::Empty => {
                tracing::debug!(url, "Listing returned 404, treating as empty");
                return Ok(Vec::new());
            }
            ListingStatus::Failed(err) => {
                tracing::warn!(url, status = status.as_u16(), "Listing request rejected");
                return Err(err);
            }
            ListingStatus::Ok => {}
        }

        response.json::<Vec<T>>().await.map_err(|e| {
            tracing::warn!(url, error = %e, "Listing payload could not be decoded");
            CatalogError::Decode(e.to_string())
        })
    }
}

enum ListingStatus {
    Ok,
    Empty,
    Failed(CatalogError),
}

fn listing_status(status: StatusCode) -> ListingStatus {
    if status == StatusCode::NOT_FOUND {
        ListingStatus::Empty
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        ListingStatus::Failed(CatalogError::RateLimited)
    } else if !status.is_success() {
        ListingStatus::Failed(CatalogError::UpstreamStatus(status.as_u16()))
    } else {
        ListingStatus::Ok
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn list_icons(&self, query: &IconQuery) -> CatalogResult<Vec<IconRecord>> {
        let url = self.icons_url(query);
        let raw: Vec<ApiIcon> = self.get_listing(&url).await?;
        Ok(raw.into_iter().map(IconRecord::from).collect())
    }

    async fn list_categories(&self) -> CatalogResult<Vec<CategoryRecord>> {
        let url = format!("{}/categories", self.base_url);
        let raw: Vec<ApiCategory> = self.get_listing(&url).await?;
        Ok(raw.into_iter().map(CategoryRecord::from).collect())
    }

    async fn fetch_markup(&self, asset_location: &str) -> CatalogResult<String> {
        let url = self.markup_url(asset_location)?;
        tracing::debug!(url = %url, "Fetching markup");

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Markup request failed");
            CatalogError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Markup request rejected");
            return Err(CatalogError::MarkupUnavailable {
                url,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))
    }

    fn name(&self) -> &str {
        "http"
    }
}
