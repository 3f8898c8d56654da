//! Screen layout: header, product table, status line, footer.

pub mod table;

use crate::notifications::NotificationLevel;
use crate::state::App;
use crate::widgets::StatusIndicator;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::rc::Rc;

/// Borders plus the column header row.
const TABLE_CHROME_ROWS: u16 = 3;

pub const LOADING_MESSAGE: &str = "Loading more products...";
pub const EXHAUSTED_MESSAGE: &str = "No more products to load";

fn main_layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area)
}

/// Body rows the product table can show on a screen of this size.
pub fn table_viewport_rows(area: Rect) -> usize {
    main_layout(area)[1].height.saturating_sub(TABLE_CHROME_ROWS) as usize
}

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let area = f.size();
    let layout = main_layout(area);

    render_header(f, app, layout[0]);
    table::render(f, app, layout[1]);
    render_status(f, app, layout[2]);
    render_footer(f, app, layout[3]);

    if app.help_visible {
        render_help(f, app, area);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let loaded = app.products().len();
    let counts = match app.catalog.total_hint() {
        Some(total) => format!("{} of {} loaded", loaded, total),
        None => format!("{} loaded", loaded),
    };
    let line = Line::from(vec![
        Span::styled(
            "Product List",
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" | {}", counts), Style::default().fg(app.theme.text_dim)),
    ]);
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(header, area);
}

/// Status text under the table, if any.
pub fn status_message(app: &App) -> Option<&'static str> {
    if app.catalog.is_loading() {
        Some(LOADING_MESSAGE)
    } else if app.catalog.is_exhausted() {
        Some(EXHAUSTED_MESSAGE)
    } else {
        None
    }
}

fn render_status(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(message) = status_message(app) else {
        return;
    };
    let color = if app.catalog.is_loading() {
        app.theme.info
    } else {
        app.theme.text_dim
    };
    StatusIndicator {
        status: message.to_string(),
        style: Style::default().fg(color),
    }
    .render(f, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help = if app.editor.is_active() {
        "[Enter] Save • [Esc] Cancel • ←/→ Home/End move cursor"
    } else {
        "j/k move • PgUp/PgDn page • g/G top/bottom • e edit title • ? help • q quit"
    };
    let (text, style) = match app.notifications.last() {
        Some(note) => {
            let (label, color) = match note.level {
                NotificationLevel::Info => ("INFO", app.theme.info),
                NotificationLevel::Success => ("SUCCESS", app.theme.success),
            };
            (format!("{}: {}", label, note.message), Style::default().fg(color))
        }
        None => (help.to_string(), Style::default().fg(app.theme.text_dim)),
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

fn render_help(f: &mut Frame<'_>, app: &App, area: Rect) {
    let popup = centered_rect(60, 50, area);
    let lines = vec![
        Line::from("j / k / ↑ / ↓   move selection"),
        Line::from("PgUp / PgDn     move a page"),
        Line::from("g / G           first / last loaded row"),
        Line::from("e / Enter       edit the selected title"),
        Line::from("Enter / Esc     save / cancel while editing"),
        Line::from("q / Ctrl+C      quit"),
        Line::from(""),
        Line::from(Span::styled(
            "More products load when the end of the list comes into view.",
            Style::default().fg(app.theme.text_dim),
        )),
    ];
    let help = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .title("Keybindings")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border_focus)),
        );
    f.render_widget(Clear, popup);
    f.render_widget(help, popup);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_rows_leave_room_for_chrome() {
        // 3 header + 1 status + 3 footer, then 3 rows of table chrome.
        assert_eq!(table_viewport_rows(Rect::new(0, 0, 80, 24)), 14);
        assert_eq!(table_viewport_rows(Rect::new(0, 0, 80, 8)), 0);
    }
}
