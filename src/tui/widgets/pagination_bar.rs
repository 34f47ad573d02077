//! Pagination bar widget
//!
//! Shows the Previous/Next controls with their disabled states and the
//! current page position. The disabled styling here is the only boundary
//! enforcement; `PageState::set_page` itself never clamps.

use crate::query::PageState;
use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Pagination bar widget
pub struct PaginationBar<'a> {
    /// Pagination window state
    pages: &'a PageState,
    /// Theme for styling
    theme: &'a Theme,
}

impl<'a> PaginationBar<'a> {
    /// Create a new pagination bar widget
    #[must_use]
    pub const fn new(pages: &'a PageState, theme: &'a Theme) -> Self {
        Self { pages, theme }
    }

    /// Position label, e.g. "page 2/3"
    #[must_use]
    pub fn position_label(pages: &PageState) -> String {
        format!("page {}/{}", pages.current_page, pages.page_count())
    }
}

impl Widget for PaginationBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        let inner = block.inner(area);
        block.render(area, buf);

        let prev_style = if self.pages.prev_enabled() {
            self.theme.cursor_style()
        } else {
            self.theme.dimmed_style()
        };
        let next_style = if self.pages.next_enabled() {
            self.theme.cursor_style()
        } else {
            self.theme.dimmed_style()
        };

        let line = Line::from(vec![
            Span::styled("◀ Previous (PgUp)", prev_style),
            Span::raw("   "),
            Span::styled(Self::position_label(self.pages), self.theme.normal_style()),
            Span::raw("   "),
            Span::styled("Next (PgDn) ▶", next_style),
        ]);

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
