//! Remote catalog abstraction
//!
//! The catalog is read-only: icons, categories and the raw markup of a single
//! asset. Implementations never retry and never cache.
//!
//! # Examples
//!
//! ```no_run
//! use libsvgl::catalog::{Catalog, HttpCatalog, IconQuery};
//! use libsvgl::config::ApiConfig;
//!
//! # async fn example() -> libsvgl::Result<()> {
//! let catalog = HttpCatalog::new(&ApiConfig::default())?;
//!
//! let query = IconQuery::new(Some("github"), None);
//! let icons = catalog.list_icons(&query).await?;
//! println!("{} icons match", icons.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};
use crate::types::{CategoryRecord, IconRecord};

pub mod http;
pub mod mock;

pub use http::HttpCatalog;
pub use mock::MockCatalog;

/// Sentinel category meaning "no category filter"
pub const ALL_CATEGORIES: &str = "all";

/// Read-only access to the icon catalog
#[async_trait]
pub trait Catalog: Send + Sync {
    /// List icons for the given query
    ///
    /// "Nothing found" is an empty vector, never an error.
    ///
    /// # Errors
    ///
    /// - `CatalogError::RateLimited` when the service throttles the client
    /// - `CatalogError::UpstreamStatus` for any other non-success status
    /// - `CatalogError::Transport` / `CatalogError::Decode` for network or
    ///   payload failures
    async fn list_icons(&self, query: &IconQuery) -> CatalogResult<Vec<IconRecord>>;

    /// List all categories with their icon counts
    async fn list_categories(&self) -> CatalogResult<Vec<CategoryRecord>>;

    /// Fetch the raw markup for the asset at `asset_location`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MissingFilename` when no filename can be taken
    /// from the location. Any non-success status is an error here; there is
    /// no not-found normalization.
    async fn fetch_markup(&self, asset_location: &str) -> CatalogResult<String>;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// Which listing endpoint to call
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum IconQuery {
    /// Full listing
    All,
    /// Search-scoped listing
    Search(String),
    /// Category-scoped listing
    Category(String),
}

impl IconQuery {
    /// Build a query from optional inputs
    ///
    /// A non-empty search term wins over any category. The `"all"` sentinel
    /// and an empty category both mean the full listing.
    pub fn new(search: Option<&str>, category: Option<&str>) -> Self {
        match (search, category) {
            (Some(term), _) if !term.is_empty() => IconQuery::Search(term.to_string()),
            (_, Some(name)) if !name.is_empty() && name != ALL_CATEGORIES => {
                IconQuery::Category(name.to_string())
            }
            _ => IconQuery::All,
        }
    }

    /// Path and query appended to the catalog base URL
    pub fn path(&self) -> String {
        match self {
            IconQuery::All => String::new(),
            IconQuery::Search(term) => format!("?search={}", urlencoding::encode(term)),
            IconQuery::Category(name) => format!("/category/{}", urlencoding::encode(name)),
        }
    }

    /// The search term, if this is a search
    pub fn search_term(&self) -> Option<&str> {
        match self {
            IconQuery::Search(term) => Some(term),
            _ => None,
        }
    }
}

impl std::fmt::Display for IconQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IconQuery::All => write!(f, "all icons"),
            IconQuery::Search(term) => write!(f, "search \"{}\"", term),
            IconQuery::Category(name) => write!(f, "category {}", name),
        }
    }
}

/// Take the filename from the last path segment of an asset location
pub fn filename_from_location(asset_location: &str) -> CatalogResult<&str> {
    match asset_location.rsplit('/').next() {
        Some(filename) if !filename.is_empty() => Ok(filename),
        _ => Err(CatalogError::MissingFilename(asset_location.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_takes_precedence_over_category() {
        let query = IconQuery::new(Some("github"), Some("Software"));
        assert_eq!(query, IconQuery::Search("github".to_string()));
    }

    #[test]
    fn test_empty_search_falls_back_to_category() {
        let query = IconQuery::new(Some(""), Some("Software"));
        assert_eq!(query, IconQuery::Category("Software".to_string()));
    }

    #[test]
    fn test_all_sentinel_means_full_listing() {
        assert_eq!(IconQuery::new(None, Some(ALL_CATEGORIES)), IconQuery::All);
        assert_eq!(IconQuery::new(Some(""), Some("")), IconQuery::All);
        assert_eq!(IconQuery::new(None, None), IconQuery::All);
    }

    #[test]
    fn test_paths() {
        assert_eq!(IconQuery::All.path(), "");
        assert_eq!(
            IconQuery::Search("next js".to_string()).path(),
            "?search=next%20js"
        );
        assert_eq!(
            IconQuery::Category("Software".to_string()).path(),
            "/category/Software"
        );
        assert_eq!(
            IconQuery::Category("Design Tools".to_string()).path(),
            "/category/Design%20Tools"
        );
    }

    #[test]
    fn test_search_term_accessor() {
        assert_eq!(IconQuery::Search("x".to_string()).search_term(), Some("x"));
        assert_eq!(IconQuery::All.search_term(), None);
    }

    #[test]
    fn test_filename_from_location() {
        assert_eq!(
            filename_from_location("https://svgl.app/library/github.svg").unwrap(),
            "github.svg"
        );
        assert_eq!(filename_from_location("github.svg").unwrap(), "github.svg");
    }

    #[test]
    fn test_filename_missing() {
        assert!(matches!(
            filename_from_location(""),
            Err(CatalogError::MissingFilename(_))
        ));
        assert!(matches!(
            filename_from_location("https://svgl.app/library/"),
            Err(CatalogError::MissingFilename(_))
        ));
    }
}
