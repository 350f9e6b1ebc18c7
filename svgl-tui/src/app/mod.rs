//! Application core
//!
//! - Actions: what can happen
//! - State: what is true right now
//! - Reducer: pure `(State, Action) -> State`
//!
//! Side effects requested by the reducer are queued on the state as
//! [`Command`]s and carried out by the event loop.

pub mod actions;
pub mod event;
pub mod reducer;
pub mod state;

pub use actions::{Action, Command};
pub use reducer::reduce;
pub use state::{AppState, CategoryListState, Focus, SearchBarState, StatusBarState, UiConfig};
