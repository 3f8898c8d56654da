//! Product table.
//!
//! Only the rows inside the viewport are built. The row after the last
//! product is the sentinel while more pages may exist; the edited row shows
//! the title input in place of its title.

use crate::state::App;
use crate::theme::rating_color;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

const SAVE_CANCEL_HINT: &str = "  [Enter] Save  [Esc] Cancel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleRow {
    Product(usize),
    Sentinel,
}

/// Rows inside the viewport, top to bottom.
pub fn visible_rows(app: &App) -> Vec<VisibleRow> {
    let len = app.products().len();
    let total = len + usize::from(app.sentinel_rendered());
    let start = app.table.offset.min(total);
    let end = (start + app.table.viewport_rows).min(total);
    (start..end)
        .map(|index| {
            if index < len {
                VisibleRow::Product(index)
            } else {
                VisibleRow::Sentinel
            }
        })
        .collect()
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let theme = &app.theme;
    let header = Row::new(["Title", "Brand", "Category", "Price", "Rating"])
        .style(
            Style::default()
                .fg(theme.secondary)
                .add_modifier(Modifier::BOLD),
        );

    let visible = visible_rows(app);
    let mut state = TableState::default();
    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .map(|(position, row)| match *row {
            VisibleRow::Product(index) => {
                if app.table.selected == Some(index) {
                    state.select(Some(position));
                }
                product_row(app, index)
            }
            VisibleRow::Sentinel => Row::new([Cell::from(Span::styled(
                "···",
                Style::default().fg(theme.text_muted),
            ))]),
        })
        .collect();

    let widths = [
        Constraint::Percentage(40),
        Constraint::Percentage(18),
        Constraint::Percentage(18),
        Constraint::Percentage(12),
        Constraint::Percentage(12),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title("Products")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .highlight_style(
            Style::default()
                .bg(theme.bg_highlight)
                .fg(theme.primary),
        );
    f.render_stateful_widget(table, area, &mut state);
}

fn product_row(app: &App, index: usize) -> Row<'static> {
    let theme = &app.theme;
    let product = &app.products()[index];

    let title = match (&app.title_input, app.editor.is_editing(product.id)) {
        (Some(input), true) => {
            let mut line = input.line(Style::default().fg(theme.tertiary));
            line.spans.push(Span::styled(
                SAVE_CANCEL_HINT,
                Style::default().fg(theme.text_dim),
            ));
            Cell::from(line)
        }
        _ => Cell::from(product.title.clone()),
    };

    Row::new(vec![
        title,
        Cell::from(product.brand_label().to_string()),
        Cell::from(product.category.clone()),
        Cell::from(product.display_price()),
        Cell::from(Line::from(Span::styled(
            product.display_rating(),
            Style::default().fg(rating_color(product.rating, theme)),
        ))),
    ])
    .style(Style::default().fg(theme.text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ThemeConfig, TuiConfig};
    use catalog_core::ProductPage;
    use catalog_test_utils::fixtures::page;

    fn app(rows: usize) -> App {
        let mut app = App::new(TuiConfig {
            api_base_url: "https://dummyjson.com".to_string(),
            request_timeout_ms: 5_000,
            tick_rate_ms: 250,
            log_path: "catalog-tui.log".into(),
            theme: ThemeConfig {
                name: "synthbrute".to_string(),
            },
        });
        app.set_viewport_rows(rows);
        let ticket = app.start().unwrap();
        app.apply_page(ticket, Ok(page(1..11)));
        app
    }

    #[test]
    fn window_starts_at_offset() {
        let app = app(3);
        assert_eq!(
            visible_rows(&app),
            vec![
                VisibleRow::Product(0),
                VisibleRow::Product(1),
                VisibleRow::Product(2)
            ]
        );
    }

    #[test]
    fn sentinel_follows_last_product() {
        let mut app = app(3);
        app.select_last();
        assert_eq!(
            visible_rows(&app),
            vec![
                VisibleRow::Product(8),
                VisibleRow::Product(9),
                VisibleRow::Sentinel
            ]
        );
    }

    #[test]
    fn no_sentinel_once_exhausted() {
        let mut app = app(20);
        let ticket = app.poll_sentinel().unwrap();
        app.apply_page(ticket, Ok(ProductPage::empty()));
        let rows = visible_rows(&app);
        assert_eq!(rows.len(), 10);
        assert!(!rows.contains(&VisibleRow::Sentinel));
    }
}
