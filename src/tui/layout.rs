//! Layout definitions for the TUI
//!
//! The register screen stacks a header, the movement table, a summary panel,
//! and a status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the register screen
pub struct AppLayout {
    /// Header: date, view mode, fetch status
    pub header: Rect,
    /// Movement table (or monthly day buckets)
    pub content: Rect,
    /// Totals, breakdown, running balance
    pub summary: Rect,
    /// Status bar with key hints
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(5),    // Content
                Constraint::Length(9), // Summary panel
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            header: vertical[0],
            content: vertical[1],
            summary: vertical[2],
            status_bar: vertical[3],
        }
    }
}

/// Centered rectangle with a fixed size, clamped to the available area
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_layout_fills_area() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = AppLayout::new(area);

        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.summary.height, 9);
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(
            layout.header.height
                + layout.content.height
                + layout.summary.height
                + layout.status_bar.height,
            24
        );
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect_fixed(60, 20, area);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
    }
}
