// Title bar widget: app name, current screen, draft progress.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use draftfc_app::protocol::{AppSnapshot, Screen};

use crate::tui::ViewState;

/// Render the title bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![
        Span::styled(
            " DraftFC ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            screen_label(state.screen()),
            Style::default().fg(Color::White),
        ),
    ];

    if let Some(progress) = state.snapshot.as_ref().and_then(progress_text) {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(progress, Style::default().fg(Color::Cyan)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Return the label for a screen.
pub fn screen_label(screen: Screen) -> &'static str {
    match screen {
        Screen::Home => "Home",
        Screen::ClubSelection => "Club Selection",
        Screen::Auction => "Auction",
    }
}

/// Screen-specific progress summary, if the screen has one.
fn progress_text(snapshot: &AppSnapshot) -> Option<String> {
    match snapshot.screen {
        Screen::Home => None,
        Screen::ClubSelection => snapshot.draft.as_ref().map(|d| {
            format!(
                "Player {}/{} ({} picked)",
                d.current_slot, d.total_slots, d.completed
            )
        }),
        Screen::Auction => Some(format!("{} players", snapshot.roster.len())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
