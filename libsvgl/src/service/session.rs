//! Async driver for the search controller
//!
//! A [`SearchSession`] owns a [`SearchController`] inside one tokio task. The
//! task waits on three things at once: commands from the front end, the
//! debounce deadline, and fetch completions. Each fetch runs in its own
//! spawned task and reports `(generation, outcome)` back; the controller
//! decides whether the outcome is still current.
//!
//! Fetches are never cancelled. A superseded one runs to completion and is
//! dropped when it reports.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::catalog::Catalog;
use crate::error::CatalogResult;
use crate::search::{FetchTicket, GallerySnapshot, SearchController};
use crate::service::events::{Event, EventBus};
use crate::types::IconRecord;

#[derive(Debug)]
enum SessionCommand {
    SetTerm(String),
    SelectCategory(String),
    Shutdown,
}

type Completion = (u64, CatalogResult<Vec<IconRecord>>);

/// Handle to a running search task
///
/// Dropping the handle stops the task once it next wakes up; fetches already
/// in flight finish on their own and are ignored.
pub struct SearchSession {
    commands: mpsc::UnboundedSender<SessionCommand>,
    snapshot: watch::Receiver<GallerySnapshot>,
    task: JoinHandle<()>,
}

impl SearchSession {
    /// Start a session; the initial full-listing fetch is issued immediately
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(catalog: Arc<dyn Catalog>, debounce: Duration, events: EventBus) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let controller = SearchController::new(debounce);
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());
        let (done_tx, done_rx) = mpsc::unbounded_channel();

        let driver = Driver {
            catalog,
            controller,
            events,
            snapshot: snapshot_tx,
            done: done_tx,
        };
        let task = tokio::spawn(driver.run(command_rx, done_rx));

        Self {
            commands: command_tx,
            snapshot: snapshot_rx,
            task,
        }
    }

    /// Report a change of the typed term
    pub fn set_term(&self, term: impl Into<String>) {
        self.send(SessionCommand::SetTerm(term.into()));
    }

    /// Report a category selection
    pub fn select_category(&self, category: impl Into<String>) {
        self.send(SessionCommand::SelectCategory(category.into()));
    }

    /// Latest published state
    pub fn snapshot(&self) -> GallerySnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receiver that is notified on every state change
    pub fn watch(&self) -> watch::Receiver<GallerySnapshot> {
        self.snapshot.clone()
    }

    /// Stop the task and wait for it to exit
    pub async fn shutdown(self) {
        self.send(SessionCommand::Shutdown);
        if let Err(e) = self.task.await {
            tracing::warn!("Search session task ended abnormally: {}", e);
        }
    }

    fn send(&self, command: SessionCommand) {
        if let Err(e) = self.commands.send(command) {
            tracing::debug!("Search session already stopped, dropping {:?}", e.0);
        }
    }
}

struct Driver {
    catalog: Arc<dyn Catalog>,
    controller: SearchController,
    events: EventBus,
    snapshot: watch::Sender<GallerySnapshot>,
    done: mpsc::UnboundedSender<Completion>,
}

impl Driver {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<SessionCommand>,
        mut completions: mpsc::UnboundedReceiver<Completion>,
    ) {
        let initial = self.controller.start();
        self.dispatch(initial);
        self.publish();

        loop {
            let deadline = self.controller.next_deadline();
            let wake_at = deadline
                .map(Instant::from_std)
                .unwrap_or_else(Instant::now);

            tokio::select! {
                command = commands.recv() => match command {
                    Some(SessionCommand::SetTerm(term)) => {
                        self.controller.set_term(term, now());
                        self.publish();
                    }
                    Some(SessionCommand::SelectCategory(category)) => {
                        if let Some(ticket) = self.controller.select_category(category, now()) {
                            self.dispatch(ticket);
                        }
                        self.publish();
                    }
                    Some(SessionCommand::Shutdown) | None => break,
                },
                Some((generation, outcome)) = completions.recv() => {
                    self.complete(generation, outcome);
                }
                _ = sleep_until(wake_at), if deadline.is_some() => {
                    if let Some(ticket) = self.controller.poll(now()) {
                        self.dispatch(ticket);
                        self.publish();
                    }
                }
            }
        }

        tracing::debug!("Search session stopped");
    }

    fn dispatch(&self, ticket: FetchTicket) {
        tracing::debug!(
            generation = ticket.generation,
            query = %ticket.query,
            catalog = self.catalog.name(),
            "Issuing fetch"
        );
        self.events.emit(Event::FetchStarted {
            generation: ticket.generation,
            query: ticket.query.clone(),
        });

        let catalog = Arc::clone(&self.catalog);
        let done = self.done.clone();
        tokio::spawn(async move {
            let outcome = catalog.list_icons(&ticket.query).await;
            // The session may be gone by now
            let _ = done.send((ticket.generation, outcome));
        });
    }

    fn complete(&mut self, generation: u64, outcome: CatalogResult<Vec<IconRecord>>) {
        let event = match &outcome {
            Ok(icons) => Event::FetchCompleted {
                generation,
                count: icons.len(),
            },
            Err(err) => Event::FetchFailed {
                generation,
                error: err.to_string(),
            },
        };

        if !self.controller.commit(generation, outcome) {
            let latest = self.controller.generation();
            tracing::debug!(generation, latest, "Discarding superseded fetch result");
            self.events.emit(Event::FetchDiscarded { generation, latest });
            return;
        }

        self.events.emit(event);
        self.publish();
    }

    fn publish(&self) {
        let snapshot = self.controller.snapshot();
        self.snapshot.send_replace(snapshot.clone());
        self.events.emit(Event::StateChanged(snapshot));
    }
}

fn now() -> std::time::Instant {
    Instant::now().into_std()
}
