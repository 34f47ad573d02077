//! Results table widget for the current page of students
//!
//! Renders the page slice of the fetched result list with a highlighted
//! row cursor, plus the inline notices the list area owns: the retained
//! search error and the "no students found" message.

use crate::api::StudentSummary;
use crate::query::AppState;
use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

/// Results table widget
pub struct ResultsTable<'a> {
    /// Application state
    state: &'a AppState,
    /// Theme for styling
    theme: &'a Theme,
    /// Title for the block
    title: String,
}

impl<'a> ResultsTable<'a> {
    /// Create a new results table widget
    #[must_use]
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        let total = state.pages.total_results;
        let title = if total == 0 {
            " Students ".to_string()
        } else {
            format!(
                " Students (page {}/{}, {} result{}) ",
                state.pages.current_page,
                state.pages.page_count(),
                total,
                if total == 1 { "" } else { "s" }
            )
        };

        Self {
            state,
            theme,
            title,
        }
    }

    /// Render one student row with fixed column widths
    fn render_row(
        &self,
        item: &StudentSummary,
        is_cursor: bool,
        widths: &ColumnWidths,
    ) -> ListItem<'a> {
        let cursor_char = if is_cursor { ">" } else { " " };
        let text_style = if is_cursor {
            self.theme.selected_style()
        } else {
            self.theme.normal_style()
        };

        let name_w = widths.name;
        let nim_w = widths.nim;
        let inst_w = widths.institution;

        let spans = vec![
            Span::styled(cursor_char, self.theme.cursor_style()),
            Span::raw(" "),
            Span::styled(format!("{:<name_w$.name_w$} ", item.name), text_style),
            Span::styled(
                format!("{:<nim_w$.nim_w$} ", item.nim),
                if is_cursor {
                    self.theme.selected_style()
                } else {
                    self.theme.nim_style()
                },
            ),
            Span::styled(
                format!("{:<inst_w$.inst_w$} ", item.institution_display()),
                text_style,
            ),
            Span::styled(item.program_name.clone(), text_style),
        ];

        ListItem::new(Line::from(spans))
    }

    fn render_notice(&self, area: Rect, buf: &mut Buffer) -> bool {
        if let Some(error) = &self.state.inline_error {
            Paragraph::new(error.as_str())
                .style(self.theme.error_style())
                .alignment(Alignment::Center)
                .render(area, buf);
            return true;
        }
        if self.state.show_no_results() {
            Paragraph::new(crate::query::state::NO_RESULTS_NOTICE)
                .style(self.theme.dimmed_style())
                .alignment(Alignment::Center)
                .render(area, buf);
            return true;
        }
        false
    }
}

/// Column widths derived from the available area
struct ColumnWidths {
    name: usize,
    nim: usize,
    institution: usize,
}

impl ColumnWidths {
    fn for_area(area: Rect) -> Self {
        // Leave room for the cursor prefix and inter-column gaps
        let usable = area.width.saturating_sub(5) as usize;
        Self {
            name: usable * 30 / 100,
            nim: 14,
            institution: usable * 32 / 100,
        }
    }
}

impl Widget for ResultsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(self.title.as_str());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if self.state.results.is_empty() && self.render_notice(inner, buf) {
            return;
        }

        let widths = ColumnWidths::for_area(inner);

        // Header line plus the page slice
        let name_w = widths.name;
        let nim_w = widths.nim;
        let inst_w = widths.institution;
        let header = ListItem::new(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!(
                    "{:<name_w$} {:<nim_w$} {:<inst_w$} {}",
                    "Nama", "NIM", "Universitas", "Program Studi"
                ),
                self.theme.header_style(),
            ),
        ]));

        let items: Vec<ListItem> = std::iter::once(header)
            .chain(
                self.state
                    .page_slice()
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| self.render_row(item, idx == self.state.cursor, &widths)),
            )
            .collect();

        List::new(items).render(inner, buf);
    }
}
