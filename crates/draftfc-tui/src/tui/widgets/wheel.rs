// Auction screen: position wheel, revealed player card, participant list.
//
// The wheel is drawn as a horizontal reel of position segments with the
// pointer fixed over the middle one. While spinning the reel advances one
// segment per render tick; once settled the segment under the pointer is
// derived from the final rotation.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use draftfc_app::protocol::{RosterEntry, WheelView};
use draftfc_core::auction::wheel::segment_under_pointer;
use draftfc_core::auction::WheelPhase;
use draftfc_core::catalog::PositionEntry;

use crate::tui::ViewState;

/// Width of one reel segment in cells.
const SEGMENT_WIDTH: usize = 6;

/// Render the auction screen into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(snapshot) = &state.snapshot else {
        return;
    };
    let wheel = &snapshot.wheel;

    let [main, side] =
        Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)]).areas(area);
    let [reel, status, card] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(1),
        Constraint::Min(4),
    ])
    .areas(main);

    render_reel(frame, reel, wheel, state.tick);

    let paragraph = Paragraph::new(Line::styled(
        status_text(wheel),
        Style::default().fg(Color::Cyan),
    ));
    frame.render_widget(paragraph, status);

    render_card(frame, card, wheel);
    render_roster(frame, side, &snapshot.roster);
}

fn render_reel(frame: &mut Frame, area: Rect, wheel: &WheelView, tick: u64) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Position Wheel ");
    let inner_width = area.width.saturating_sub(2) as usize;

    let Some(center) = pointer_index(wheel, tick) else {
        let paragraph = Paragraph::new("No positions").block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let mut visible = (inner_width / SEGMENT_WIDTH).clamp(1, wheel.segments.len());
    if visible % 2 == 0 {
        visible -= 1;
    }
    let indices = reel_indices(center, wheel.segments.len(), visible);
    let pad = " ".repeat(visible / 2 * SEGMENT_WIDTH);

    let pointer = Line::from(vec![
        Span::raw(pad.clone()),
        Span::styled(
            format!("{:^width$}", "▼", width = SEGMENT_WIDTH),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let segments = Line::from(
        indices
            .iter()
            .map(|&i| {
                let entry = &wheel.segments[i];
                let mut style = Style::default().fg(Color::Black).bg(segment_color(entry));
                if i == center {
                    style = style.add_modifier(Modifier::BOLD);
                }
                Span::styled(
                    format!("{:^width$}", entry.short_name(), width = SEGMENT_WIDTH),
                    style,
                )
            })
            .collect::<Vec<_>>(),
    );

    let label = Line::from(vec![
        Span::raw(pad),
        Span::styled(
            wheel.segments[center].full_name.clone(),
            Style::default().fg(Color::White),
        ),
    ]);

    let paragraph = Paragraph::new(vec![pointer, segments, label]).block(block);
    frame.render_widget(paragraph, area);
}

fn render_card(frame: &mut Frame, area: Rect, wheel: &WheelView) {
    let block = Block::default().borders(Borders::ALL).title(" Player ");

    let lines = match (&wheel.current_card, &wheel.selected_position) {
        (Some(card), position) => {
            let mut lines = vec![Line::styled(
                card.name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )];
            if let Some(position) = position {
                lines.push(Line::from(vec![
                    Span::styled("Position:   ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        position.full_name.clone(),
                        Style::default().fg(segment_color(position)),
                    ),
                ]));
            }
            lines.push(Line::from(vec![
                Span::styled("Base price: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format_price(card.base_price),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            if !card.image.is_empty() {
                lines.push(Line::styled(
                    card.image.clone(),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines
        }
        (None, _) => vec![Line::styled(
            "No player revealed yet",
            Style::default().fg(Color::DarkGray),
        )],
    };

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_roster(frame: &mut Frame, area: Rect, roster: &[RosterEntry]) {
    let lines: Vec<Line> = roster
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled(
                    format!("{:>2}. ", entry.slot),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    entry.display_name.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {}", entry.club_name),
                    Style::default().fg(Color::Cyan),
                ),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Players "));
    frame.render_widget(paragraph, area);
}

/// Segment currently under the pointer. `None` for an empty wheel.
pub fn pointer_index(wheel: &WheelView, tick: u64) -> Option<usize> {
    let n = wheel.segments.len();
    if n == 0 {
        return None;
    }
    Some(match wheel.phase {
        WheelPhase::Spinning => (tick % n as u64) as usize,
        _ => segment_under_pointer(wheel.rotation, n),
    })
}

/// `visible` consecutive segment indices centered on `center`, wrapping
/// around the wheel.
pub fn reel_indices(center: usize, segments: usize, visible: usize) -> Vec<usize> {
    let visible = visible.min(segments);
    let start = center + segments - visible / 2;
    (0..visible).map(|i| (start + i) % segments).collect()
}

/// One-line prompt for the wheel's current phase.
pub fn status_text(wheel: &WheelView) -> String {
    let position = wheel
        .selected_position
        .as_ref()
        .map(|p| format!("{} ({})", p.full_name, p.short_name()));
    match (wheel.phase, position) {
        (WheelPhase::Spinning, _) => " Spinning...".to_string(),
        (WheelPhase::PositionSelected, Some(p)) => {
            format!(" {p} selected. Press p to pick a player")
        }
        (WheelPhase::PlayerSelected, Some(p)) => {
            format!(" {p}. Press p for another player or b to start bidding")
        }
        _ => " Press s to spin the wheel".to_string(),
    }
}

/// Prices are in millions.
pub fn format_price(base_price: u32) -> String {
    format!("${base_price}M")
}

fn segment_color(entry: &PositionEntry) -> Color {
    entry.color.parse().unwrap_or(Color::Gray)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
