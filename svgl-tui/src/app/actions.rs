//! Actions and commands
//!
//! Actions describe what happened; the reducer turns them into state.
//! Commands describe I/O the reducer wants done; the event loop runs them.

use crossterm::event::KeyEvent;
use libsvgl::error::CatalogResult;
use libsvgl::preferences::Theme;
use libsvgl::search::GallerySnapshot;
use libsvgl::service::IconSource;
use libsvgl::{CategoryRecord, IconRecord};

#[derive(Debug, Clone)]
pub enum Action {
    // === UI Events ===
    Key(KeyEvent),

    /// Periodic tick; drives redraws while fetches are in flight
    Tick,

    Resize(u16, u16),

    // === Navigation ===
    Quit,
    ShowHelp,
    HideHelp,
    FocusNext,
    FocusPrevious,
    MoveUp,
    MoveDown,

    // === Search ===
    /// The search bar text changed
    SearchInput(String),

    /// Category chosen in the sidebar (`"all"` for the full listing)
    SelectCategory(String),

    /// New state published by the search session
    GalleryUpdated(GallerySnapshot),

    // === Categories ===
    CategoriesLoaded(Vec<CategoryRecord>),
    CategoriesFailed(String),

    // === Detail panel ===
    /// Open the icon under the cursor in the results list
    OpenSelectedIcon,

    DetailLoaded {
        token: u64,
        outcome: CatalogResult<IconSource>,
    },

    CloseDetail,

    // === Preferences ===
    ThemeLoaded(Theme),
    ToggleTheme,

    // === Status Bar ===
    SetStatus(String),
    ClearStatus,
}

/// Side effects requested by the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetTerm(String),
    SelectCategory(String),
    LoadDetail { token: u64, icon: IconRecord },
    SaveTheme(Theme),
}
