//! Catalog records
//!
//! The upstream payload varies in shape: an icon's category may be a single
//! string or a list, and its route may be a plain URL or a light/dark pair.
//! Those variants are captured with untagged enums here and normalized into
//! the fixed-shape records the rest of the crate works with.

use serde::{Deserialize, Serialize};

/// Category shown for icons that carry none
pub const UNCATEGORIZED: &str = "Uncategorized";

/// An icon as the gallery sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRecord {
    pub id: i64,
    pub name: String,
    /// Source categories joined by ", "
    pub category: String,
    /// URL of the light variant of the asset
    pub asset_location: String,
}

/// A category and the number of icons it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub name: String,
    pub total_count: u64,
}

/// Raw icon record as returned by the catalog
#[derive(Debug, Clone, Deserialize)]
pub struct ApiIcon {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub category: Option<CategoryField>,
    pub route: RouteField,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub wordmark: Option<RouteField>,
    #[serde(default, rename = "brandUrl")]
    pub brand_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryField {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RouteField {
    Plain(String),
    Themed(ThemeOptions),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThemeOptions {
    #[serde(default)]
    pub light: Option<String>,
    #[serde(default)]
    pub dark: Option<String>,
}

/// Raw category record as returned by the catalog
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCategory {
    pub category: String,
    pub total: u64,
}

impl CategoryField {
    fn joined(&self) -> String {
        match self {
            CategoryField::One(name) => name.clone(),
            CategoryField::Many(names) => names.join(", "),
        }
    }
}

impl RouteField {
    /// The light variant; dark is only used when a record has no light asset
    pub fn light(&self) -> String {
        match self {
            RouteField::Plain(url) => url.clone(),
            RouteField::Themed(ThemeOptions { light: Some(url), .. }) => url.clone(),
            RouteField::Themed(ThemeOptions { light: None, dark }) => {
                tracing::debug!("Asset has no light variant, using dark");
                dark.clone().unwrap_or_default()
            }
        }
    }
}

impl From<ApiIcon> for IconRecord {
    fn from(icon: ApiIcon) -> Self {
        let category = icon
            .category
            .as_ref()
            .map(CategoryField::joined)
            .filter(|joined| !joined.is_empty())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());

        Self {
            id: icon.id,
            name: icon.title,
            category,
            asset_location: icon.route.light(),
        }
    }
}

impl From<ApiCategory> for CategoryRecord {
    fn from(category: ApiCategory) -> Self {
        Self {
            name: category.category,
            total_count: category.total,
        }
    }
}
