//! Blocking loading overlay widget
//!
//! Shown while a request is in flight. Input other than quit is ignored
//! while this overlay is up; it clears when the request completes.

use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::centered_rect;

/// Spinner frames cycled by the event-loop tick counter
const SPINNER: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];

/// Loading overlay widget
pub struct LoadingOverlay<'a> {
    /// Message describing what is being fetched
    message: &'a str,
    /// Theme for styling
    theme: &'a Theme,
    /// Tick counter used to pick the spinner frame
    tick: usize,
}

impl<'a> LoadingOverlay<'a> {
    /// Create a new loading overlay
    #[must_use]
    pub const fn new(message: &'a str, theme: &'a Theme, tick: usize) -> Self {
        Self {
            message,
            theme,
            tick,
        }
    }
}

impl Widget for LoadingOverlay<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (self.message.len() as u16 + 8).clamp(30, 60);
        let modal_area = centered_rect(width, 5, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.warning_style())
            .title(" Please wait ")
            .title_alignment(Alignment::Center);

        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let spinner = SPINNER[self.tick % SPINNER.len()];
        let line = Line::from(vec![
            Span::styled(spinner.to_string(), self.theme.info_style()),
            Span::raw(" "),
            Span::raw(self.message),
        ]);

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
