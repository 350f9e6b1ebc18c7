//! Pure reducer for state transitions
//!
//! `reduce` performs no I/O. Anything that needs the network or the
//! filesystem is queued on `AppState::commands` for the event loop.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use libsvgl::catalog::ALL_CATEGORIES;

use super::actions::{Action, Command};
use super::state::{AppState, CategoryListState, Focus, SearchBarState, StatusBarState};

pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => handle_key(state, key),
        Action::Tick => state,
        Action::Resize(_, _) => state,

        // === Navigation ===
        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        Action::FocusNext => AppState {
            focus: state.focus.next(),
            ..state
        },

        Action::FocusPrevious => AppState {
            focus: state.focus.previous(),
            ..state
        },

        Action::MoveUp => match state.focus {
            Focus::Categories => AppState {
                categories: CategoryListState {
                    cursor: state.categories.cursor.saturating_sub(1),
                    ..state.categories
                },
                ..state
            },
            Focus::Icons => AppState {
                selected_icon: state.selected_icon.saturating_sub(1),
                ..state
            },
            Focus::Search => state,
        },

        Action::MoveDown => match state.focus {
            Focus::Categories => {
                let last = state.categories.row_count() - 1;
                AppState {
                    categories: CategoryListState {
                        cursor: (state.categories.cursor + 1).min(last),
                        ..state.categories
                    },
                    ..state
                }
            }
            Focus::Icons => {
                let last = state.icons().len().saturating_sub(1);
                AppState {
                    selected_icon: (state.selected_icon + 1).min(last),
                    ..state
                }
            }
            Focus::Search => AppState {
                focus: Focus::Icons,
                ..state
            },
        },

        // === Search ===
        Action::SearchInput(input) => {
            if input == state.search.input {
                return state;
            }
            let state = with_command(state, Command::SetTerm(input.clone()));
            AppState {
                search: SearchBarState { input },
                selected_icon: 0,
                ..state
            }
        }

        Action::SelectCategory(name) => {
            let cursor = if name == ALL_CATEGORIES {
                0
            } else {
                state
                    .categories
                    .items
                    .iter()
                    .position(|c| c.name == name)
                    .map(|i| i + 1)
                    .unwrap_or(state.categories.cursor)
            };
            let state = with_command(state, Command::SelectCategory(name));
            AppState {
                // Choosing a category clears the typed term
                search: SearchBarState::default(),
                categories: CategoryListState {
                    cursor,
                    ..state.categories
                },
                selected_icon: 0,
                ..state
            }
        }

        Action::GalleryUpdated(gallery) => {
            let last = gallery.results.icons.len().saturating_sub(1);
            AppState {
                selected_icon: state.selected_icon.min(last),
                gallery,
                ..state
            }
        }

        // === Categories ===
        Action::CategoriesLoaded(items) => {
            let cursor = state.categories.cursor.min(items.len());
            AppState {
                categories: CategoryListState {
                    items,
                    cursor,
                    loading: false,
                    error: None,
                },
                ..state
            }
        }

        Action::CategoriesFailed(error) => AppState {
            categories: CategoryListState {
                loading: false,
                error: Some(error),
                ..state.categories
            },
            ..state
        },

        // === Detail panel ===
        Action::OpenSelectedIcon => {
            let Some(icon) = state.selected_icon().cloned() else {
                return state;
            };
            let mut detail = state.detail.clone();
            let token = detail.open(icon.clone());
            let state = with_command(state, Command::LoadDetail { token, icon });
            AppState { detail, ..state }
        }

        Action::DetailLoaded { token, outcome } => {
            let mut detail = state.detail.clone();
            if !detail.complete(token, outcome) {
                return state;
            }
            AppState { detail, ..state }
        }

        Action::CloseDetail => {
            let mut detail = state.detail.clone();
            detail.close();
            AppState { detail, ..state }
        }

        // === Preferences ===
        Action::ThemeLoaded(theme) => AppState { theme, ..state },

        Action::ToggleTheme => {
            let theme = state.theme.toggle();
            let state = with_command(state, Command::SaveTheme(theme));
            AppState {
                theme,
                status: StatusBarState {
                    message: Some(format!("Theme: {}", theme)),
                },
                ..state
            }
        }

        // === Status Bar ===
        Action::SetStatus(message) => AppState {
            status: StatusBarState {
                message: Some(message),
            },
            ..state
        },

        Action::ClearStatus => AppState {
            status: StatusBarState { message: None },
            ..state
        },
    }
}

fn with_command(mut state: AppState, command: Command) -> AppState {
    state.commands.push(command);
    state
}

/// Map keys to actions; this is where keybindings live
fn handle_key(state: AppState, key: KeyEvent) -> AppState {
    // Global bindings
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return reduce(state, Action::Quit),

        (KeyCode::F(1), _) => {
            let action = if state.help_visible {
                Action::HideHelp
            } else {
                Action::ShowHelp
            };
            return reduce(state, action);
        }

        (KeyCode::F(2), _) => return reduce(state, Action::ToggleTheme),

        (KeyCode::Esc, _) if state.help_visible => return reduce(state, Action::HideHelp),

        (KeyCode::Esc, _) if state.detail.is_open() => return reduce(state, Action::CloseDetail),

        _ => {}
    }

    // Overlays swallow everything else
    if state.help_visible {
        return state;
    }
    if state.detail.is_open() {
        return match key.code {
            KeyCode::Char('q') => reduce(state, Action::Quit),
            _ => state,
        };
    }

    match key.code {
        KeyCode::Tab => return reduce(state, Action::FocusNext),
        KeyCode::BackTab => return reduce(state, Action::FocusPrevious),
        _ => {}
    }

    match state.focus {
        Focus::Search => handle_search_key(state, key),
        Focus::Categories | Focus::Icons => handle_list_key(state, key),
    }
}

/// Keys while the search bar has focus: text goes into the term
fn handle_search_key(state: AppState, key: KeyEvent) -> AppState {
    match (key.code, key.modifiers) {
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
            reduce(state, Action::SearchInput(String::new()))
        }

        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            let mut input = state.search.input.clone();
            input.push(c);
            reduce(state, Action::SearchInput(input))
        }

        (KeyCode::Backspace, _) => {
            let mut input = state.search.input.clone();
            if input.pop().is_none() {
                return state;
            }
            reduce(state, Action::SearchInput(input))
        }

        (KeyCode::Enter, _) | (KeyCode::Down, _) => reduce(state, Action::MoveDown),

        _ => state,
    }
}

/// Keys while the category sidebar or the results list has focus
fn handle_list_key(state: AppState, key: KeyEvent) -> AppState {
    match key.code {
        KeyCode::Char('q') => reduce(state, Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => reduce(state, Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => reduce(state, Action::MoveDown),
        KeyCode::Char('/') => AppState {
            focus: Focus::Search,
            ..state
        },
        KeyCode::Enter => match state.focus {
            Focus::Categories => {
                let name = state.categories.name_at_cursor();
                reduce(state, Action::SelectCategory(name))
            }
            _ => reduce(state, Action::OpenSelectedIcon),
        },
        _ => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libsvgl::catalog::mock::sample_icon;
    use libsvgl::preferences::Theme;
    use libsvgl::search::GallerySnapshot;
    use libsvgl::service::detail::DetailStatus;
    use libsvgl::service::IconSource;
    use libsvgl::CategoryRecord;

    fn with_icons(state: AppState, count: i64) -> AppState {
        let mut gallery = GallerySnapshot::default();
        gallery.results.icons = (1..=count)
            .map(|i| sample_icon(i, &format!("Icon {}", i), "Software"))
            .collect();
        reduce(state, Action::GalleryUpdated(gallery))
    }

    #[test]
    fn test_reducer_is_pure() {
        let state = AppState::new();
        let original = state.clone();

        let new_state = reduce(state, Action::SetStatus("Test".to_string()));

        assert!(original.status.message.is_none());
        assert_eq!(new_state.status.message, Some("Test".to_string()));
    }

    #[test]
    fn test_search_input_queues_term() {
        let mut state = reduce(AppState::new(), Action::SearchInput("git".to_string()));

        assert_eq!(state.search.input, "git");
        assert_eq!(
            state.take_commands(),
            vec![Command::SetTerm("git".to_string())]
        );
        assert!(state.commands.is_empty());
    }

    #[test]
    fn test_same_input_queues_nothing() {
        let mut state = reduce(AppState::new(), Action::SearchInput("git".to_string()));
        state.take_commands();

        let mut state = reduce(state, Action::SearchInput("git".to_string()));
        assert!(state.take_commands().is_empty());
    }

    #[test]
    fn test_select_category_clears_input() {
        let mut state = reduce(AppState::new(), Action::SearchInput("git".to_string()));
        state.take_commands();

        let mut state = reduce(state, Action::SelectCategory("Software".to_string()));

        assert_eq!(state.search.input, "");
        assert_eq!(
            state.take_commands(),
            vec![Command::SelectCategory("Software".to_string())]
        );
    }

    #[test]
    fn test_select_category_syncs_cursor() {
        let state = reduce(
            AppState::new(),
            Action::CategoriesLoaded(vec![
                CategoryRecord {
                    name: "AI".to_string(),
                    total_count: 3,
                },
                CategoryRecord {
                    name: "Software".to_string(),
                    total_count: 40,
                },
            ]),
        );

        let state = reduce(state, Action::SelectCategory("Software".to_string()));
        assert_eq!(state.categories.cursor, 2);

        let state = reduce(state, Action::SelectCategory(ALL_CATEGORIES.to_string()));
        assert_eq!(state.categories.cursor, 0);
    }

    #[test]
    fn test_gallery_update_clamps_selection() {
        let mut state = with_icons(AppState::new(), 5);
        state.selected_icon = 4;

        let state = with_icons(state, 2);
        assert_eq!(state.selected_icon, 1);
    }

    #[test]
    fn test_open_icon_queues_detail_load() {
        let mut state = with_icons(AppState::new(), 3);
        state.selected_icon = 1;

        let mut state = reduce(state, Action::OpenSelectedIcon);

        assert!(state.detail.is_open());
        match state.take_commands().as_slice() {
            [Command::LoadDetail { token, icon }] => {
                assert_eq!(*token, 1);
                assert_eq!(icon.name, "Icon 2");
            }
            other => panic!("unexpected commands: {:?}", other),
        }
    }

    #[test]
    fn test_open_with_no_icons_does_nothing() {
        let mut state = reduce(AppState::new(), Action::OpenSelectedIcon);
        assert!(!state.detail.is_open());
        assert!(state.take_commands().is_empty());
    }

    #[test]
    fn test_stale_detail_ignored() {
        let mut state = with_icons(AppState::new(), 2);
        state = reduce(state, Action::OpenSelectedIcon);
        state = reduce(state, Action::CloseDetail);
        state.selected_icon = 1;
        state = reduce(state, Action::OpenSelectedIcon);

        state = reduce(
            state,
            Action::DetailLoaded {
                token: 1,
                outcome: Ok(IconSource::from_raw("<svg/>")),
            },
        );

        let open = state.detail.current().unwrap();
        assert_eq!(open.icon.name, "Icon 2");
        assert_eq!(open.status, DetailStatus::Loading);
    }

    #[test]
    fn test_toggle_theme_queues_save() {
        let mut state = reduce(AppState::new(), Action::ToggleTheme);

        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(state.take_commands(), vec![Command::SaveTheme(Theme::Dark)]);
        assert_eq!(state.status.message, Some("Theme: dark".to_string()));
    }

    #[test]
    fn test_categories_failed() {
        let state = reduce(
            AppState::new(),
            Action::CategoriesFailed("Network error: refused".to_string()),
        );
        assert!(!state.categories.loading);
        assert_eq!(
            state.categories.error,
            Some("Network error: refused".to_string())
        );
    }
}
