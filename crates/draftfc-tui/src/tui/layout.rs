// Screen layout: zone arrangement and sizing.
//
// +--------------------------------------------------+
// | Title Bar (1 row)                                 |
// +--------------------------------------------------+
// | Body (fill): home / club selection / auction      |
// +--------------------------------------------------+
// | Notice (1 row)                                    |
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: app name, screen name, draft progress.
    pub title_bar: Rect,
    /// Screen-specific content.
    pub body: Rect,
    /// Last rejected-command message.
    pub notice: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Min(6),    // body
            Constraint::Length(1), // notice
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        title_bar: vertical[0],
        body: vertical[1],
        notice: vertical[2],
        help_bar: vertical[3],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_rows_stack_without_gaps() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = build_layout(area);
        assert_eq!(layout.title_bar.y, 0);
        assert_eq!(layout.body.y, 1);
        assert_eq!(layout.notice.y, layout.body.y + layout.body.height);
        assert_eq!(layout.help_bar.y, layout.notice.y + 1);
        assert_eq!(layout.help_bar.y + 1, area.height);
    }

    #[test]
    fn body_takes_remaining_height() {
        let layout = build_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.body.height, 21);
        assert_eq!(layout.body.width, 80);
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let layout = build_layout(Rect::new(0, 0, 10, 3));
        let total = layout.title_bar.height
            + layout.body.height
            + layout.notice.height
            + layout.help_bar.height;
        assert!(total <= 3);
    }
}
