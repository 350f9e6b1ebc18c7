//! SVGL gallery - browse the svgl.app icon catalog
//!
//! This library provides the pieces shared by the gallery front ends:
//! a read-only catalog client, the markup dialect converter, and the
//! debounced search controller that keeps results in sync with user input.

pub mod catalog;
pub mod config;
pub mod convert;
pub mod error;
pub mod logging;
pub mod preferences;
pub mod search;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use catalog::{Catalog, HttpCatalog, IconQuery};
pub use config::Config;
pub use error::{CatalogError, Result, SvglError};
pub use preferences::{PreferenceStore, Theme};
pub use search::{GallerySnapshot, QueryState, ResultState, SearchController};
pub use service::GalleryService;
pub use types::{CategoryRecord, IconRecord};
