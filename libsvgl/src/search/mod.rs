//! Search/filter controller
//!
//! Owns the query state (typed term, debounced term, active category),
//! decides which catalog call a change requires, and makes sure only the
//! most recently issued fetch may write results.
//!
//! The controller is a plain state machine: time is passed in by the caller
//! and fetches are handed out as [`FetchTicket`]s rather than performed. The
//! async driver in [`crate::service::session`] runs it on tokio; tests drive
//! it directly with synthetic instants.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use libsvgl::search::SearchController;
//! use libsvgl::catalog::IconQuery;
//!
//! let start = Instant::now();
//! let mut controller = SearchController::new(Duration::from_millis(300));
//!
//! let first = controller.start();
//! assert_eq!(first.query, IconQuery::All);
//!
//! controller.set_term("github", start);
//! assert!(controller.poll(start + Duration::from_millis(100)).is_none());
//!
//! let ticket = controller.poll(start + Duration::from_millis(300)).unwrap();
//! assert_eq!(ticket.query, IconQuery::Search("github".to_string()));
//!
//! // The first fetch resolves late and is discarded
//! assert!(!controller.commit(first.generation, Ok(Vec::new())));
//! assert!(controller.commit(ticket.generation, Ok(Vec::new())));
//! ```

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::catalog::{IconQuery, ALL_CATEGORIES};
use crate::error::CatalogResult;
use crate::types::IconRecord;

pub mod debounce;

pub use debounce::Debouncer;

/// Default quiet period for typed search terms
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Shown when a category (or the full listing) has no icons
pub const EMPTY_CATEGORY_MESSAGE: &str = "No icons available for this category.";

/// Empty-state message for a search that matched nothing
pub fn empty_search_message(term: &str) -> String {
    format!("Your search for \"{}\" did not return any results.", term)
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    /// Text as typed
    pub raw_term: String,
    /// Text after the quiet period; drives fetches
    pub debounced_term: String,
    /// `"all"` or a category name
    pub active_category: String,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            raw_term: String::new(),
            debounced_term: String::new(),
            active_category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl QueryState {
    /// The request this state calls for
    ///
    /// A non-empty debounced term always produces a search; the active
    /// category only matters when no term is in effect.
    pub fn fetch_query(&self) -> IconQuery {
        IconQuery::new(Some(&self.debounced_term), Some(&self.active_category))
    }
}

/// What the current fetch cycle produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultState {
    pub icons: Vec<IconRecord>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// A fetch the caller must perform and report back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: IconQuery,
}

/// How the results area should be presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView<'a> {
    Loading,
    Error(&'a str),
    Empty(String),
    Icons(&'a [IconRecord]),
}

/// Point-in-time copy of controller state, for front ends
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GallerySnapshot {
    pub query: QueryState,
    pub results: ResultState,
    pub generation: u64,
}

impl GallerySnapshot {
    pub fn view(&self) -> ResultView<'_> {
        result_view(&self.query, &self.results)
    }
}

fn result_view<'a>(query: &QueryState, results: &'a ResultState) -> ResultView<'a> {
    if results.is_loading {
        ResultView::Loading
    } else if let Some(ref error) = results.error {
        ResultView::Error(error)
    } else if results.icons.is_empty() {
        let message = if query.debounced_term.is_empty() {
            EMPTY_CATEGORY_MESSAGE.to_string()
        } else {
            empty_search_message(&query.debounced_term)
        };
        ResultView::Empty(message)
    } else {
        ResultView::Icons(&results.icons)
    }
}

/// Debounced, last-request-wins search state machine
#[derive(Debug, Clone)]
pub struct SearchController {
    query: QueryState,
    results: ResultState,
    debouncer: Debouncer<String>,
    /// Generation of the most recently issued fetch
    generation: u64,
}

impl SearchController {
    pub fn new(debounce: Duration) -> Self {
        Self {
            query: QueryState::default(),
            results: ResultState::default(),
            debouncer: Debouncer::new(debounce),
            generation: 0,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn results(&self) -> &ResultState {
        &self.results
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn view(&self) -> ResultView<'_> {
        result_view(&self.query, &self.results)
    }

    pub fn snapshot(&self) -> GallerySnapshot {
        GallerySnapshot {
            query: self.query.clone(),
            results: self.results.clone(),
            generation: self.generation,
        }
    }

    /// Issue the initial fetch for the starting state
    pub fn start(&mut self) -> FetchTicket {
        self.begin_fetch()
    }

    /// Record a change of the typed term
    ///
    /// Restarts the quiet period; the term only takes effect through
    /// [`poll`](Self::poll). Setting the same text again is a no-op.
    pub fn set_term(&mut self, term: impl Into<String>, now: Instant) {
        let term = term.into();
        if term == self.query.raw_term {
            return;
        }
        self.query.raw_term = term.clone();
        self.debouncer.push(term, now);
    }

    /// Switch category
    ///
    /// Clears the typed term right away (which restarts the quiet period if it
    /// was non-empty) and fetches if the category actually changed. While a
    /// previous search term is still in effect that fetch is a search; the
    /// category-scoped fetch follows once the cleared term settles.
    pub fn select_category(
        &mut self,
        category: impl Into<String>,
        now: Instant,
    ) -> Option<FetchTicket> {
        self.set_term(String::new(), now);

        let category = category.into();
        if category == self.query.active_category {
            return None;
        }
        self.query.active_category = category;
        Some(self.begin_fetch())
    }

    /// When [`poll`](Self::poll) next needs to run
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Let the debounce timer fire; returns a fetch if the effective term changed
    pub fn poll(&mut self, now: Instant) -> Option<FetchTicket> {
        let settled = self.debouncer.poll(now)?;
        if settled == self.query.debounced_term {
            return None;
        }
        self.query.debounced_term = settled;
        Some(self.begin_fetch())
    }

    /// Apply a fetch outcome
    ///
    /// Returns `false` and leaves state untouched when `generation` is not the
    /// latest issued one.
    pub fn commit(&mut self, generation: u64, outcome: CatalogResult<Vec<IconRecord>>) -> bool {
        if generation != self.generation {
            return false;
        }

        self.results.is_loading = false;
        match outcome {
            Ok(icons) => {
                self.results.icons = icons;
                self.results.error = None;
            }
            Err(err) => {
                self.results.icons = Vec::new();
                self.results.error = Some(err.to_string());
            }
        }
        true
    }

    fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.results.is_loading = true;
        self.results.error = None;
        FetchTicket {
            generation: self.generation,
            query: self.query.fetch_query(),
        }
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
