//! Icon detail panel
//!
//! Shows the selected icon's metadata and, once loaded, its markup in both
//! display and component form.

use libsvgl::service::detail::{DetailStatus, OpenDetail};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::Palette;

pub fn render(frame: &mut Frame, area: Rect, detail: &OpenDetail, palette: &Palette) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", detail.icon.name))
        .title_bottom(" Esc: Close ")
        .borders(Borders::ALL)
        .border_style(palette.focused_border)
        .style(palette.base);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);

    let meta = vec![
        Line::from(vec![
            Span::styled("Category: ", palette.muted),
            Span::raw(detail.icon.category.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Asset:    ", palette.muted),
            Span::raw(detail.icon.asset_location.as_str()),
        ]),
    ];
    frame.render_widget(Paragraph::new(meta), rows[0]);

    match detail.status {
        DetailStatus::Loading => {
            frame.render_widget(
                Paragraph::new(Span::styled("Loading SVG...", palette.muted)),
                rows[1],
            );
        }
        DetailStatus::Failed(ref message) => {
            frame.render_widget(
                Paragraph::new(Span::styled(message.as_str(), palette.error)),
                rows[1],
            );
        }
        DetailStatus::Ready(ref source) => {
            let panes = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[1]);

            let markup = Paragraph::new(source.markup.as_str())
                .wrap(Wrap { trim: false })
                .block(Block::default().title(" SVG ").borders(Borders::TOP));
            frame.render_widget(markup, panes[0]);

            let component = Paragraph::new(source.component.as_str())
                .wrap(Wrap { trim: false })
                .block(Block::default().title(" JSX ").borders(Borders::TOP));
            frame.render_widget(component, panes[1]);
        }
    }
}
