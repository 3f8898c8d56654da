//! Status line under the table: loading indicator or end-of-catalog message.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

pub struct StatusIndicator {
    pub status: String,
    pub style: Style,
}

impl StatusIndicator {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let paragraph = Paragraph::new(self.status.clone())
            .style(self.style)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }
}
