//! Application state
//!
//! The single source of truth for the UI. All transitions go through the
//! reducer (see `reducer.rs`).

use libsvgl::catalog::ALL_CATEGORIES;
use libsvgl::preferences::Theme;
use libsvgl::search::{GallerySnapshot, ResultState};
use libsvgl::service::DetailState;
use libsvgl::{CategoryRecord, IconRecord};

use super::actions::Command;

/// Which pane receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Categories,
    Icons,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Categories,
            Focus::Categories => Focus::Icons,
            Focus::Icons => Focus::Search,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Search => Focus::Icons,
            Focus::Categories => Focus::Search,
            Focus::Icons => Focus::Categories,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub should_quit: bool,
    pub focus: Focus,
    pub help_visible: bool,
    pub theme: Theme,

    /// Text in the search bar
    pub search: SearchBarState,

    /// Sidebar contents and cursor
    pub categories: CategoryListState,

    /// Latest state published by the search session
    pub gallery: GallerySnapshot,

    /// Cursor in the results list
    pub selected_icon: usize,

    pub detail: DetailState,
    pub status: StatusBarState,
    pub config: UiConfig,

    /// Side effects waiting for the event loop
    pub commands: Vec<Command>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchBarState {
    pub input: String,
}

#[derive(Debug, Clone)]
pub struct CategoryListState {
    pub items: Vec<CategoryRecord>,
    /// Cursor; 0 is the "All" entry, `n` is `items[n - 1]`
    pub cursor: usize,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StatusBarState {
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors_enabled: bool,
    pub tick_rate_ms: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            should_quit: false,
            focus: Focus::Search,
            help_visible: false,
            theme: Theme::default(),
            search: SearchBarState::default(),
            categories: CategoryListState::default(),
            // The session fetches immediately, so start out loading
            gallery: GallerySnapshot {
                results: ResultState {
                    is_loading: true,
                    ..ResultState::default()
                },
                ..GallerySnapshot::default()
            },
            selected_icon: 0,
            detail: DetailState::new(),
            status: StatusBarState::default(),
            config: UiConfig::default(),
            commands: Vec::new(),
        }
    }
}

impl Default for CategoryListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
            loading: true,
            error: None,
        }
    }
}

impl CategoryListState {
    /// Number of sidebar rows, including "All"
    pub fn row_count(&self) -> usize {
        self.items.len() + 1
    }

    /// Category name at the cursor; `"all"` for the first row
    pub fn name_at_cursor(&self) -> String {
        match self.cursor {
            0 => ALL_CATEGORIES.to_string(),
            n => self
                .items
                .get(n - 1)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| ALL_CATEGORIES.to_string()),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        let colors_enabled = std::env::var("NO_COLOR").is_err()
            && std::env::var("SVGL_TUI_NO_COLOR").is_err();

        let tick_rate_ms = std::env::var("SVGL_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            colors_enabled,
            tick_rate_ms,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Icons currently listed
    pub fn icons(&self) -> &[IconRecord] {
        &self.gallery.results.icons
    }

    pub fn selected_icon(&self) -> Option<&IconRecord> {
        self.icons().get(self.selected_icon)
    }

    /// Category the session is filtering by
    pub fn active_category(&self) -> &str {
        &self.gallery.query.active_category
    }

    /// Take queued side effects, leaving the queue empty
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}
