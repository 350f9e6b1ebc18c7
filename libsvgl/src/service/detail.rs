//! Icon detail panel state
//!
//! Opening an icon fetches its markup and derives the display and component
//! forms. Each open gets a fresh token; a markup fetch that resolves after a
//! newer open (or after close) is dropped.

use serde::Serialize;

use crate::convert::{markup_to_component_source, normalize_markup};
use crate::error::CatalogResult;
use crate::types::IconRecord;

/// Text shown in the panel when the markup cannot be fetched
pub const DETAIL_FAILURE_MESSAGE: &str = "Failed to load SVG content.";

/// The two renderings of an icon's markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconSource {
    /// Normalized markup, ready to display or copy
    pub markup: String,
    /// Component-embeddable form
    pub component: String,
}

impl IconSource {
    pub fn from_raw(raw: &str) -> Self {
        Self {
            markup: normalize_markup(raw),
            component: markup_to_component_source(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailStatus {
    Loading,
    Ready(IconSource),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDetail {
    pub icon: IconRecord,
    pub status: DetailStatus,
}

/// Which icon (if any) the panel shows, and how far its load got
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailState {
    token: u64,
    open: Option<OpenDetail>,
}

impl DetailState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&OpenDetail> {
        self.open.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Open the panel for `icon`; returns the token its load must report with
    pub fn open(&mut self, icon: IconRecord) -> u64 {
        self.token += 1;
        self.open = Some(OpenDetail {
            icon,
            status: DetailStatus::Loading,
        });
        self.token
    }

    /// Apply a markup load; returns `false` if the token is stale
    pub fn complete(&mut self, token: u64, outcome: CatalogResult<IconSource>) -> bool {
        if token != self.token {
            return false;
        }
        let Some(open) = self.open.as_mut() else {
            return false;
        };

        open.status = match outcome {
            Ok(source) => DetailStatus::Ready(source),
            Err(err) => {
                tracing::warn!(icon = %open.icon.name, error = %err, "Markup load failed");
                DetailStatus::Failed(DETAIL_FAILURE_MESSAGE.to_string())
            }
        };
        true
    }

    /// Close the panel; any load still in flight becomes stale
    pub fn close(&mut self) {
        self.token += 1;
        self.open = None;
    }
}
