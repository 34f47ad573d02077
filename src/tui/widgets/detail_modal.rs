//! Detail modal widget for displaying one student's enrollment record

use crate::api::StudentDetail;
use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::centered_rect;

/// Detail modal widget shown over a dimmed backdrop
pub struct DetailModal<'a> {
    /// Record to display
    detail: &'a StudentDetail,
    /// Theme for styling
    theme: &'a Theme,
}

impl<'a> DetailModal<'a> {
    /// Create a new detail modal
    #[must_use]
    pub const fn new(detail: &'a StudentDetail, theme: &'a Theme) -> Self {
        Self { detail, theme }
    }

    /// Build content lines for the modal
    fn build_content(&self) -> Vec<Line<'static>> {
        let field = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(
                    format!("{label:<26}"),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(value),
            ])
        };

        let mut lines = vec![Line::from(vec![Span::styled(
            self.detail.name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )])];
        lines.push(Line::from("─".repeat(56)));
        lines.push(Line::default());

        lines.push(field("Nama", self.detail.name.clone()));
        lines.push(field("NIM", self.detail.nim.clone()));
        lines.push(field("Program Studi", self.detail.program_name.clone()));
        lines.push(field("Nama Universitas", self.detail.institution_name.clone()));
        lines.push(field("Jenis Kelamin", self.detail.sex_display().to_string()));
        lines.push(field("Tanggal Masuk", self.detail.enrolled_at_display()));
        lines.push(field(
            "Status Awal Mahasiswa",
            self.detail.initial_status.clone(),
        ));
        lines.push(field(
            "Status Terbaru Mahasiswa",
            self.detail.current_status.clone(),
        ));

        lines.push(Line::default());
        lines.push(Line::from("─".repeat(56)));
        lines.push(Line::from(Span::styled(
            "Enter/Esc: Tutup",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));

        lines
    }
}

impl Widget for DetailModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Dim the whole backdrop before drawing the panel
        buf.set_style(area, Style::default().add_modifier(Modifier::DIM));

        let popup_area = centered_rect(62, 17, area);
        Clear.render(popup_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(" Student Details ")
            .title_alignment(Alignment::Center);

        let paragraph = Paragraph::new(self.build_content())
            .block(block)
            .wrap(Wrap { trim: false });
        paragraph.render(popup_area, buf);
    }
}
