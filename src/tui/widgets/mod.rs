//! Ratatui widgets for the student search TUI
//!
//! Custom widgets for rendering the search interface.

mod detail_modal;
mod error_dialog;
mod help_bar;
mod help_overlay;
mod loading_overlay;
mod pagination_bar;
mod results_table;
mod search_bar;
mod status_line;

pub use detail_modal::DetailModal;
pub use error_dialog::ErrorDialog;
pub use help_bar::{HelpBar, KeyHint};
pub use help_overlay::HelpOverlay;
pub use loading_overlay::LoadingOverlay;
pub use pagination_bar::PaginationBar;
pub use results_table::ResultsTable;
pub use search_bar::SearchBar;
pub use status_line::StatusLine;

use ratatui::layout::Rect;

/// Calculate a centered area of the given size within `area`
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 10, area);
        assert_eq!(rect.x, 20);
        assert_eq!(rect.y, 15);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.height, 10);
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 5);
        let rect = centered_rect(60, 10, area);
        assert_eq!(rect.width, 30);
        assert_eq!(rect.height, 5);
    }
}
