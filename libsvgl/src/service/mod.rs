//! Service layer for the SVGL gallery
//!
//! [`GalleryService`] is the single entry point shared by every front end. It
//! holds the catalog, configuration and preference store, and hands out
//! search sessions wired to its event bus.
//!
//! # Example
//!
//! ```no_run
//! use libsvgl::service::GalleryService;
//!
//! # async fn example() -> libsvgl::Result<()> {
//! let service = GalleryService::new()?;
//!
//! let categories = service.categories().await?;
//! println!("{} categories", categories.len());
//!
//! let session = service.spawn_search()?;
//! session.set_term("github");
//! # Ok(())
//! # }
//! ```

pub mod detail;
pub mod events;
pub mod session;

pub use detail::{DetailState, IconSource};
pub use events::{Event, EventBus};
pub use session::SearchSession;

use std::sync::Arc;

use crate::catalog::{Catalog, HttpCatalog, IconQuery};
use crate::config::Config;
use crate::error::Result;
use crate::preferences::PreferenceStore;
use crate::types::{CategoryRecord, IconRecord};

/// Facade over catalog, configuration and preferences
pub struct GalleryService {
    catalog: Arc<dyn Catalog>,
    config: Arc<Config>,
    preferences: PreferenceStore,
    event_bus: EventBus,
}

impl GalleryService {
    /// Create a service from the configuration at the default location
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the HTTP
    /// client cannot be built from it.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::from_config(config)
    }

    /// Create a service talking to the HTTP catalog described by `config`
    pub fn from_config(config: Config) -> Result<Self> {
        let catalog = HttpCatalog::new(&config.api)?;
        Ok(Self::with_catalog(Arc::new(catalog), config))
    }

    /// Create a service over any catalog implementation
    pub fn with_catalog(catalog: Arc<dyn Catalog>, config: Config) -> Self {
        let preferences = PreferenceStore::from_config(&config);
        Self {
            catalog,
            config: Arc::new(config),
            preferences,
            event_bus: EventBus::new(100),
        }
    }

    pub fn catalog(&self) -> &Arc<dyn Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    /// Subscribe to events from sessions spawned by this service
    pub fn subscribe(&self) -> events::EventReceiver {
        self.event_bus.subscribe()
    }

    /// One-shot icon listing
    pub async fn icons(&self, query: &IconQuery) -> Result<Vec<IconRecord>> {
        Ok(self.catalog.list_icons(query).await?)
    }

    pub async fn categories(&self) -> Result<Vec<CategoryRecord>> {
        Ok(self.catalog.list_categories().await?)
    }

    /// Fetch an icon's markup and derive its display and component forms
    pub async fn load_detail(&self, icon: &IconRecord) -> Result<IconSource> {
        let raw = self.catalog.fetch_markup(&icon.asset_location).await?;
        Ok(IconSource::from_raw(&raw))
    }

    /// Start a debounced search session using the configured quiet period
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `search.debounce` does not parse.
    pub fn spawn_search(&self) -> Result<SearchSession> {
        let debounce = self.config.search.debounce()?;
        Ok(SearchSession::spawn(
            Arc::clone(&self.catalog),
            debounce,
            self.event_bus.clone(),
        ))
    }
}
