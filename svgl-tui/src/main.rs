//! svgl-tui - Terminal UI for the svgl.app icon gallery
//!
//! Browse categories, search with live results, and open an icon to see its
//! markup and component source.

use libsvgl::logging::{LogFormat, LoggingConfig};
use svgl_tui::{
    app::{event::EventHandler, reduce, Action, AppState},
    error::Result,
    services::ServiceHandle,
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    ui,
};

fn main() -> Result<()> {
    // The terminal owns stdout and stderr, so logs only go to a file
    if let Ok(path) = std::env::var("SVGL_TUI_LOG") {
        let level = std::env::var("SVGL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        LoggingConfig::new(LogFormat::Text, level, false)
            .with_file(path)
            .init()?;
    }

    // Install panic hook to restore terminal on panic
    install_panic_hook();

    // Connect before touching the terminal so config errors print normally
    let mut services = ServiceHandle::new()?;

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut services);
    restore_terminal(terminal)?;

    services.shutdown();
    result
}

fn run_app(terminal: &mut Tui, services: &mut ServiceHandle) -> Result<()> {
    let mut state = reduce(AppState::new(), Action::ThemeLoaded(services.load_theme()));

    services.start()?;
    services.load_categories();

    let event_handler = EventHandler::new(state.config.tick_rate_ms);

    loop {
        terminal.draw(|frame| ui::render(frame, &state))?;

        let event = event_handler.next()?;
        state = reduce(state, event.into());

        // Results from background work
        while let Ok(action) = services.actions().try_recv() {
            state = reduce(state, action);
        }

        for command in state.take_commands() {
            services.execute(command);
        }

        if state.should_quit {
            break;
        }
    }

    tracing::info!("Exiting");
    Ok(())
}
