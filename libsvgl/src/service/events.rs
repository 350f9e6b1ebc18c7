//! Event bus for search progress
//!
//! In-process broadcast of what a search session is doing, so front ends can
//! redraw without polling.
//!
//! The bus uses `tokio::sync::broadcast`: any number of subscribers, and
//! emitting never blocks. With no subscribers, events are dropped. A lagging
//! subscriber loses the oldest events first; `StateChanged` always carries a
//! full snapshot, so catching up only needs the latest one.
//!
//! # Example
//!
//! ```
//! use libsvgl::catalog::IconQuery;
//! use libsvgl::service::events::{Event, EventBus};
//!
//! # async fn example() {
//! let bus = EventBus::new(100);
//! let mut receiver = bus.subscribe();
//!
//! bus.emit(Event::FetchStarted {
//!     generation: 1,
//!     query: IconQuery::All,
//! });
//!
//! if let Ok(event) = receiver.recv().await {
//!     println!("Received: {:?}", event);
//! }
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::catalog::IconQuery;
use crate::search::GallerySnapshot;

pub type EventReceiver = broadcast::Receiver<Event>;

/// Broadcast channel for session events
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Receive all events emitted after this call
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers
    pub fn emit(&self, event: Event) {
        // Err only means nobody is listening
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Events emitted by a search session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A fetch cycle was issued
    FetchStarted { generation: u64, query: IconQuery },

    /// The latest fetch resolved with records
    FetchCompleted { generation: u64, count: usize },

    /// The latest fetch resolved with an error
    FetchFailed { generation: u64, error: String },

    /// A superseded fetch resolved and was ignored
    FetchDiscarded { generation: u64, latest: u64 },

    /// Query or result state changed
    StateChanged(GallerySnapshot),
}
