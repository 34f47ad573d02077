//! Blocking error dialog widget
//!
//! A modal overlay that reports a failed request and waits for a single
//! acknowledgement before the user can continue.

use crate::query::DialogState;
use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::centered_rect;

/// Error dialog overlay widget
pub struct ErrorDialog<'a> {
    state: &'a DialogState,
    theme: &'a Theme,
}

impl<'a> ErrorDialog<'a> {
    /// Create a new error dialog widget
    #[must_use]
    pub const fn new(state: &'a DialogState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for ErrorDialog<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let message_width = self.state.message.len() as u16 + 4;
        let width = message_width
            .clamp(40, 70)
            .min(area.width.saturating_sub(4));
        let height = 7;

        let modal_area = centered_rect(width, height, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.error_style().add_modifier(Modifier::BOLD))
            .title(format!(" {} ", self.state.title))
            .title_alignment(Alignment::Center);

        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Spacing
            Constraint::Length(2), // Message
            Constraint::Length(1), // Button
            Constraint::Length(1), // Help
        ])
        .split(inner);

        let message = Paragraph::new(self.state.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true });
        message.render(chunks[1], buf);

        let button = Line::from(Span::styled(
            " Okay ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ));
        Paragraph::new(button)
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        let help = Paragraph::new("Enter/Esc: dismiss")
            .style(self.theme.dimmed_style())
            .alignment(Alignment::Center);
        help.render(chunks[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use crate::query::DialogState;

    #[test]
    fn test_dialog_state_creation() {
        let state = DialogState::error("Request failed with HTTP 500");
        assert_eq!(state.title, "Error");
        assert!(state.message.contains("500"));
    }
}
