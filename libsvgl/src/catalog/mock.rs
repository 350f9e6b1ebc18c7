//! In-memory catalog for testing
//!
//! Responses are configured per query, each with an optional delay, so tests
//! can stage overlapping fetches and check which result wins. Every call is
//! recorded for verification.
//!
//! Available in all builds (not just tests) so integration tests in other
//! crates can use it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::catalog::{filename_from_location, Catalog, IconQuery};
use crate::error::{CatalogError, CatalogResult};
use crate::types::{CategoryRecord, IconRecord};

/// A canned response with a simulated latency
#[derive(Debug, Clone)]
pub struct MockResponse<T> {
    pub outcome: CatalogResult<T>,
    pub delay: Duration,
}

impl<T> MockResponse<T> {
    pub fn ok(value: T) -> Self {
        Self {
            outcome: Ok(value),
            delay: Duration::ZERO,
        }
    }

    pub fn err(error: CatalogError) -> Self {
        Self {
            outcome: Err(error),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Configurable mock catalog
#[derive(Clone, Default)]
pub struct MockCatalog {
    icons: Arc<Mutex<HashMap<IconQuery, MockResponse<Vec<IconRecord>>>>>,
    categories: Arc<Mutex<Option<MockResponse<Vec<CategoryRecord>>>>>,
    markup: Arc<Mutex<HashMap<String, MockResponse<String>>>>,
    icon_calls: Arc<Mutex<Vec<IconQuery>>>,
    markup_calls: Arc<Mutex<Vec<String>>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `query` with `response`
    pub fn with_icons(self, query: IconQuery, response: MockResponse<Vec<IconRecord>>) -> Self {
        self.icons.lock().unwrap().insert(query, response);
        self
    }

    /// Respond to the category listing with `response`
    pub fn with_categories(self, response: MockResponse<Vec<CategoryRecord>>) -> Self {
        *self.categories.lock().unwrap() = Some(response);
        self
    }

    /// Respond to markup requests for `filename` with `response`
    pub fn with_markup(self, filename: &str, response: MockResponse<String>) -> Self {
        self.markup
            .lock()
            .unwrap()
            .insert(filename.to_string(), response);
        self
    }

    /// Queries seen by `list_icons`, in call order
    pub fn icon_calls(&self) -> Vec<IconQuery> {
        self.icon_calls.lock().unwrap().clone()
    }

    /// Filenames seen by `fetch_markup`, in call order
    pub fn markup_calls(&self) -> Vec<String> {
        self.markup_calls.lock().unwrap().clone()
    }
}

async fn respond<T: Clone>(response: Option<MockResponse<T>>, missing: CatalogResult<T>) -> CatalogResult<T> {
    match response {
        Some(response) => {
            if !response.delay.is_zero() {
                sleep(response.delay).await;
            }
            response.outcome
        }
        None => missing,
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn list_icons(&self, query: &IconQuery) -> CatalogResult<Vec<IconRecord>> {
        self.icon_calls.lock().unwrap().push(query.clone());
        let response = self.icons.lock().unwrap().get(query).cloned();
        // Unknown queries behave like a 404: nothing there
        respond(response, Ok(Vec::new())).await
    }

    async fn list_categories(&self) -> CatalogResult<Vec<CategoryRecord>> {
        let response = self.categories.lock().unwrap().clone();
        respond(response, Ok(Vec::new())).await
    }

    async fn fetch_markup(&self, asset_location: &str) -> CatalogResult<String> {
        let filename = filename_from_location(asset_location)?;
        self.markup_calls.lock().unwrap().push(filename.to_string());
        let response = self.markup.lock().unwrap().get(filename).cloned();
        respond(
            response,
            Err(CatalogError::MarkupUnavailable {
                url: format!("mock://svg/{}", filename),
                status: 404,
            }),
        )
        .await
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Build an icon record for tests
pub fn sample_icon(id: i64, name: &str, category: &str) -> IconRecord {
    IconRecord {
        id,
        name: name.to_string(),
        category: category.to_string(),
        asset_location: format!(
            "https://svgl.app/library/{}.svg",
            name.to_lowercase().replace(' ', "_")
        ),
    }
}
