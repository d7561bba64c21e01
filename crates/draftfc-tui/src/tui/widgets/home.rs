// Home screen: choose how many players take part, then start the draft.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use draftfc_app::protocol::AppSnapshot;

const PANEL_WIDTH: u16 = 40;
const PANEL_HEIGHT: u16 = 9;

/// Render the home screen into the given area.
pub fn render(frame: &mut Frame, area: Rect, snapshot: &AppSnapshot) {
    let panel = centered_rect(PANEL_WIDTH, PANEL_HEIGHT, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(Span::styled(
            " New Draft ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(build_lines(snapshot))
        .block(block)
        .centered();
    frame.render_widget(paragraph, panel);
}

fn build_lines(snapshot: &AppSnapshot) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let arrow = |enabled: bool| {
        if enabled {
            Style::default().fg(Color::Yellow)
        } else {
            dim
        }
    };

    vec![
        Line::raw(""),
        Line::styled("Number of players", Style::default().fg(Color::Gray)),
        Line::from(vec![
            Span::styled("-  ", arrow(snapshot.player_count > snapshot.min_players)),
            Span::styled(
                snapshot.player_count.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  +", arrow(snapshot.player_count < snapshot.max_players)),
        ]),
        Line::styled(
            format!("({} to {})", snapshot.min_players, snapshot.max_players),
            dim,
        ),
        Line::raw(""),
        Line::styled(
            "Press Enter to pick clubs",
            Style::default().fg(Color::Cyan),
        ),
    ]
}

/// Compute a centered rectangle of the given size within `area`, clamped to
/// the space available.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .split(area);
    let horizontal = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .split(vertical[0]);
    horizontal[0]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
