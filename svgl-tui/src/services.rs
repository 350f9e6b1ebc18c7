//! Bridge between the async service layer and the synchronous event loop
//!
//! `ServiceHandle` owns a tokio runtime, the `GalleryService` and the search
//! session. Everything asynchronous reports back as an [`Action`] on a
//! crossbeam channel that the event loop drains once per iteration.
//!
//! # Example
//!
//! ```no_run
//! use svgl_tui::services::ServiceHandle;
//!
//! # fn example() -> svgl_tui::Result<()> {
//! let mut services = ServiceHandle::new()?;
//! services.start()?;
//!
//! while let Ok(action) = services.actions().try_recv() {
//!     println!("{:?}", action);
//! }
//! # Ok(())
//! # }
//! ```

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use libsvgl::preferences::Theme;
use libsvgl::service::{Event, GalleryService, IconSource, SearchSession};
use libsvgl::{Config, IconRecord};

use crate::app::{Action, Command};
use crate::error::{Result, TuiError};

pub struct ServiceHandle {
    service: Arc<GalleryService>,
    runtime: tokio::runtime::Runtime,
    session: Option<SearchSession>,
    action_tx: Sender<Action>,
    action_rx: Receiver<Action>,
}

impl ServiceHandle {
    /// Load configuration and connect to the configured catalog
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        let service = GalleryService::from_config(config)?;
        Self::with_service(service)
    }

    /// Wrap an existing service (used by tests with a mock catalog)
    pub fn with_service(service: GalleryService) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (action_tx, action_rx) = unbounded();

        Ok(Self {
            service: Arc::new(service),
            runtime,
            session: None,
            action_tx,
            action_rx,
        })
    }

    /// Start the search session and forward its state to the action channel
    pub fn start(&mut self) -> Result<()> {
        if self.session.is_some() {
            return Err(TuiError::Application(
                "search session already started".to_string(),
            ));
        }

        // Subscribe first so the initial state is not missed
        let mut events = self.service.subscribe();
        let tx = self.action_tx.clone();
        self.runtime.spawn(async move {
            loop {
                match events.recv().await {
                    Ok(Event::StateChanged(snapshot)) => {
                        if tx.send(Action::GalleryUpdated(snapshot)).is_err() {
                            break;
                        }
                    }
                    Ok(Event::FetchDiscarded { generation, latest }) => {
                        tracing::debug!(generation, latest, "Stale fetch discarded");
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        // Every StateChanged carries a full snapshot; the next one catches up
                        tracing::warn!("Event receiver lagged, skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        let _guard = self.runtime.enter();
        self.session = Some(self.service.spawn_search()?);
        Ok(())
    }

    /// Receiver for actions produced by background work
    pub fn actions(&self) -> &Receiver<Action> {
        &self.action_rx
    }

    /// Carry out a side effect queued by the reducer
    pub fn execute(&self, command: Command) {
        match command {
            Command::SetTerm(term) => {
                if let Some(session) = &self.session {
                    session.set_term(term);
                }
            }
            Command::SelectCategory(category) => {
                if let Some(session) = &self.session {
                    session.select_category(category);
                }
            }
            Command::LoadDetail { token, icon } => self.load_detail(token, icon),
            Command::SaveTheme(theme) => {
                if let Err(e) = self.service.preferences().save_theme(theme) {
                    tracing::warn!("Failed to save theme: {}", e);
                    let _ = self
                        .action_tx
                        .send(Action::SetStatus(format!("Could not save theme: {}", e)));
                }
            }
        }
    }

    /// Fetch the category list in the background
    pub fn load_categories(&self) {
        let service = Arc::clone(&self.service);
        let tx = self.action_tx.clone();
        self.runtime.spawn(async move {
            let action = match service.catalog().list_categories().await {
                Ok(categories) => Action::CategoriesLoaded(categories),
                Err(e) => {
                    tracing::warn!("Failed to load categories: {}", e);
                    Action::CategoriesFailed(e.to_string())
                }
            };
            let _ = tx.send(action);
        });
    }

    fn load_detail(&self, token: u64, icon: IconRecord) {
        let service = Arc::clone(&self.service);
        let tx = self.action_tx.clone();
        self.runtime.spawn(async move {
            let outcome = service
                .catalog()
                .fetch_markup(&icon.asset_location)
                .await
                .map(|raw| IconSource::from_raw(&raw));
            let _ = tx.send(Action::DetailLoaded { token, outcome });
        });
    }

    /// Stored theme; read problems fall back to the default
    pub fn load_theme(&self) -> Theme {
        self.service.preferences().load_theme().unwrap_or_else(|e| {
            tracing::warn!("Failed to read preferences: {}", e);
            Theme::default()
        })
    }

    /// Stop the session and wait for it to finish
    pub fn shutdown(mut self) {
        if let Some(session) = self.session.take() {
            self.runtime.block_on(session.shutdown());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libsvgl::catalog::mock::{sample_icon, MockCatalog, MockResponse};
    use libsvgl::catalog::IconQuery;
    use libsvgl::error::CatalogError;
    use libsvgl::CategoryRecord;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);

    fn handle(catalog: MockCatalog, dir: &tempfile::TempDir) -> ServiceHandle {
        let mut config = Config::default();
        config.preferences.path = dir
            .path()
            .join("preferences.toml")
            .to_string_lossy()
            .to_string();
        ServiceHandle::with_service(GalleryService::with_catalog(Arc::new(catalog), config))
            .unwrap()
    }

    #[test]
    fn test_categories_delivered_as_action() {
        let dir = tempfile::TempDir::new().unwrap();
        let catalog = MockCatalog::new().with_categories(MockResponse::ok(vec![CategoryRecord {
            name: "Software".to_string(),
            total_count: 4,
        }]));
        let services = handle(catalog, &dir);

        services.load_categories();

        match services.actions().recv_timeout(WAIT).unwrap() {
            Action::CategoriesLoaded(items) => assert_eq!(items[0].name, "Software"),
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_category_failure_delivered_as_action() {
        let dir = tempfile::TempDir::new().unwrap();
        let catalog =
            MockCatalog::new().with_categories(MockResponse::err(CatalogError::RateLimited));
        let services = handle(catalog, &dir);

        services.load_categories();

        assert!(matches!(
            services.actions().recv_timeout(WAIT).unwrap(),
            Action::CategoriesFailed(_)
        ));
    }

    #[test]
    fn test_start_forwards_gallery_state() {
        let dir = tempfile::TempDir::new().unwrap();
        let catalog = MockCatalog::new().with_icons(
            IconQuery::All,
            MockResponse::ok(vec![sample_icon(1, "GitHub", "Software")]),
        );
        let mut services = handle(catalog, &dir);

        services.start().unwrap();

        let loaded = loop {
            match services.actions().recv_timeout(WAIT).unwrap() {
                Action::GalleryUpdated(snapshot) if !snapshot.results.is_loading => break snapshot,
                _ => continue,
            }
        };
        assert_eq!(loaded.results.icons[0].name, "GitHub");
        assert!(services.start().is_err());

        services.shutdown();
    }

    #[test]
    fn test_detail_load_converts_markup() {
        let dir = tempfile::TempDir::new().unwrap();
        let catalog = MockCatalog::new()
            .with_markup("github.svg", MockResponse::ok("<svg class=\"x\"/>".to_string()));
        let services = handle(catalog, &dir);

        services.execute(Command::LoadDetail {
            token: 7,
            icon: sample_icon(1, "GitHub", "Software"),
        });

        match services.actions().recv_timeout(WAIT).unwrap() {
            Action::DetailLoaded { token, outcome } => {
                assert_eq!(token, 7);
                assert_eq!(outcome.unwrap().component, "<svg {...props} className=\"x\"/>");
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_theme_round_trip_through_preferences() {
        let dir = tempfile::TempDir::new().unwrap();
        let services = handle(MockCatalog::new(), &dir);

        assert_eq!(services.load_theme(), Theme::Light);
        services.execute(Command::SaveTheme(Theme::Dark));
        assert_eq!(services.load_theme(), Theme::Dark);
    }
}
