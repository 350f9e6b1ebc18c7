//! UI rendering
//!
//! Render functions read state and draw; they never change it.

mod detail;

use libsvgl::catalog::ALL_CATEGORIES;
use libsvgl::preferences::Theme;
use libsvgl::search::ResultView;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, Focus};

/// Colours for the active theme, or plain styles when colours are off
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub base: Style,
    pub accent: Style,
    pub muted: Style,
    pub error: Style,
    pub focused_border: Style,
    pub highlight: Style,
}

impl Palette {
    pub fn for_state(state: &AppState) -> Self {
        if !state.config.colors_enabled {
            return Self {
                base: Style::default(),
                accent: Style::default().add_modifier(Modifier::BOLD),
                muted: Style::default(),
                error: Style::default().add_modifier(Modifier::BOLD),
                focused_border: Style::default().add_modifier(Modifier::BOLD),
                highlight: Style::default().add_modifier(Modifier::REVERSED),
            };
        }

        match state.theme {
            Theme::Light => Self {
                base: Style::default().fg(Color::Black).bg(Color::White),
                accent: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
                muted: Style::default().fg(Color::DarkGray),
                error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                focused_border: Style::default().fg(Color::Blue),
                highlight: Style::default().fg(Color::White).bg(Color::Blue),
            },
            Theme::Dark => Self {
                base: Style::default().fg(Color::Gray).bg(Color::Black),
                accent: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                muted: Style::default().fg(Color::DarkGray),
                error: Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
                focused_border: Style::default().fg(Color::Cyan),
                highlight: Style::default().fg(Color::Black).bg(Color::Cyan),
            },
        }
    }

    fn border(&self, focused: bool) -> Style {
        if focused {
            self.focused_border
        } else {
            self.muted
        }
    }
}

/// Draw the whole application
pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let palette = Palette::for_state(state);

    frame.render_widget(Block::default().style(palette.base), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, rows[0], state, &palette);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(20)])
        .split(rows[1]);

    render_categories(frame, columns[0], state, &palette);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(columns[1]);

    render_search_bar(frame, main[0], state, &palette);
    render_results(frame, main[1], state, &palette);
    render_status_bar(frame, rows[2], state, &palette);

    if let Some(open) = state.detail.current() {
        detail::render(frame, centered_rect(80, 80, area), open, &palette);
    }

    if state.help_visible {
        render_help_overlay(frame, centered_rect(60, 70, area), &palette);
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let header = Line::from(vec![
        Span::styled(" svgl ", palette.accent),
        Span::styled("icon gallery", palette.muted),
        Span::raw("  "),
        Span::styled(format!("[{}]", state.theme), palette.muted),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn render_categories(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let block = Block::default()
        .title(" Categories ")
        .borders(Borders::ALL)
        .border_style(palette.border(state.focus == Focus::Categories));

    if let Some(ref error) = state.categories.error {
        let text = Paragraph::new(error.as_str())
            .style(palette.error)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let active = state.active_category();
    let mut items = vec![category_item("All", None, active == ALL_CATEGORIES, palette)];
    items.extend(state.categories.items.iter().map(|c| {
        category_item(&c.name, Some(c.total_count), active == c.name, palette)
    }));
    if state.categories.loading {
        items.push(ListItem::new(Span::styled("Loading...", palette.muted)));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(palette.highlight);
    let mut list_state = ListState::default().with_selected(Some(state.categories.cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn category_item<'a>(
    name: &'a str,
    count: Option<u64>,
    active: bool,
    palette: &Palette,
) -> ListItem<'a> {
    let marker = if active { "* " } else { "  " };
    let mut spans = vec![Span::raw(marker), Span::raw(name)];
    if let Some(count) = count {
        spans.push(Span::styled(format!(" ({})", count), palette.muted));
    }
    ListItem::new(Line::from(spans))
}

fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let focused = state.focus == Focus::Search;
    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(palette.border(focused));

    let line = if state.search.input.is_empty() && !focused {
        Line::from(Span::styled("Type to search icons...", palette.muted))
    } else {
        let mut spans = vec![Span::raw(state.search.input.as_str())];
        if focused {
            spans.push(Span::styled("_", palette.accent));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_results(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let block = Block::default()
        .title(results_title(state))
        .borders(Borders::ALL)
        .border_style(palette.border(state.focus == Focus::Icons));

    match state.gallery.view() {
        ResultView::Loading => {
            let text = Paragraph::new(Span::styled("Loading icons...", palette.muted))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(text, area);
        }
        ResultView::Error(message) => {
            let text = Paragraph::new(Span::styled(message, palette.error))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(text, area);
        }
        ResultView::Empty(message) => {
            let text = Paragraph::new(message)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(text, area);
        }
        ResultView::Icons(icons) => {
            let items: Vec<ListItem> = icons
                .iter()
                .map(|icon| {
                    ListItem::new(Line::from(vec![
                        Span::raw(icon.name.as_str()),
                        Span::styled(format!("  {}", icon.category), palette.muted),
                    ]))
                })
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(palette.highlight);
            let mut list_state = ListState::default().with_selected(Some(state.selected_icon));
            frame.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn results_title(state: &AppState) -> String {
    let query = &state.gallery.query;
    let count = state.icons().len();
    if !query.debounced_term.is_empty() {
        format!(" Results for \"{}\" ({}) ", query.debounced_term, count)
    } else if query.active_category != ALL_CATEGORIES {
        format!(" {} ({}) ", query.active_category, count)
    } else {
        format!(" All icons ({}) ", count)
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let hints = match state.focus {
        Focus::Search => "Tab: Focus | Ctrl+U: Clear | F1: Help | F2: Theme | Ctrl+C: Quit",
        Focus::Categories => "Enter: Select | Tab: Focus | /: Search | F1: Help | q: Quit",
        Focus::Icons => "Enter: Open | Tab: Focus | /: Search | F1: Help | q: Quit",
    };

    let line = match state.status.message {
        Some(ref message) => Line::from(vec![
            Span::styled(message.as_str(), palette.accent),
            Span::raw(" | "),
            Span::styled(hints, palette.muted),
        ]),
        None => Line::from(Span::styled(hints, palette.muted)),
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, palette: &Palette) {
    let help_text = vec![
        Line::from(Span::styled("Keyboard Shortcuts", palette.accent)),
        Line::from(""),
        Line::from("Global:"),
        Line::from("  Tab / Shift+Tab - Move focus"),
        Line::from("  F1              - Toggle help"),
        Line::from("  F2              - Toggle light/dark theme"),
        Line::from("  Esc             - Close panel or help"),
        Line::from("  Ctrl+C          - Quit"),
        Line::from(""),
        Line::from("Search bar:"),
        Line::from("  Type            - Search (after a short pause)"),
        Line::from("  Ctrl+U          - Clear"),
        Line::from("  Enter / Down    - Go to results"),
        Line::from(""),
        Line::from("Categories and results:"),
        Line::from("  Up / Down, k/j  - Move"),
        Line::from("  Enter           - Select category / open icon"),
        Line::from("  /               - Back to search"),
        Line::from("  q               - Quit"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .style(palette.base)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(palette.focused_border),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

/// Rectangle centred in `r`, sized as percentages of it
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
