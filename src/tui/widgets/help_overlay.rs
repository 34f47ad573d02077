//! Help overlay widget listing all keybinds

use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::centered_rect;

/// The full keybind list shown by F1
const BINDS: &[(&str, &str)] = &[
    ("type", "Edit the search query"),
    ("↑ / ↓", "Move the row cursor"),
    ("PgUp / PgDn", "Previous / next page"),
    ("Enter", "Show details for the highlighted student"),
    ("Ctrl+Y", "Copy the highlighted student's NIM"),
    ("Ctrl+U", "Clear the search query"),
    ("F1", "Show this help"),
    ("Esc / Ctrl+C", "Quit"),
];

/// Help overlay widget
pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    /// Create a new help overlay
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpOverlay<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = BINDS.len() as u16 + 4;
        let modal_area = centered_rect(56, height, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(" Help ")
            .title_alignment(Alignment::Center);

        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let mut lines = Vec::with_capacity(BINDS.len() + 2);
        for (key, action) in BINDS {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<14}"), self.theme.cursor_style()),
                Span::raw(*action),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Press any key to close",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}
