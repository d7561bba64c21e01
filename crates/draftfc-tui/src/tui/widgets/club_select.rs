// Club selection screen: progress gauge, club grid, name field.
//
// Clubs held by other players stay selectable but are greyed out with the
// holder's name; the club picked for the current slot is shown in green.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use draftfc_app::protocol::{ClubView, DraftView};

use crate::tui::ViewState;

/// Number of clubs per grid row.
pub const GRID_COLUMNS: usize = 4;

/// Render the club selection screen into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(draft) = state.snapshot.as_ref().and_then(|s| s.draft.as_ref()) else {
        return;
    };

    let [header, grid, name] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
    ])
    .areas(area);

    render_progress(frame, header, draft);
    render_grid(frame, grid, state, draft);
    render_name(frame, name, state);
}

fn render_progress(frame: &mut Frame, area: Rect, draft: &DraftView) {
    let ratio = (draft.progress_percent / 100.0).clamp(0.0, 1.0);
    let title = format!(" Player {} of {} ", draft.current_slot, draft.total_slots);
    let label = format!("{} of {} clubs picked", draft.completed, draft.total_slots);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, area);
}

fn render_grid(frame: &mut Frame, area: Rect, state: &ViewState, draft: &DraftView) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let cell_width = (inner_width / GRID_COLUMNS).max(1);
    let visible_rows = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = draft
        .clubs
        .chunks(GRID_COLUMNS)
        .enumerate()
        .map(|(row, clubs)| {
            let spans = clubs
                .iter()
                .enumerate()
                .map(|(col, club)| {
                    let under_cursor = row * GRID_COLUMNS + col == state.club_cursor;
                    Span::styled(
                        fit(&cell_text(club), cell_width),
                        cell_style(club, under_cursor),
                    )
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect();

    // Keep the cursor row on screen.
    let cursor_row = state.club_cursor / GRID_COLUMNS;
    let scroll = cursor_row.saturating_sub(visible_rows.saturating_sub(1)) as u16;

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Clubs "))
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_name(frame: &mut Frame, area: Rect, state: &ViewState) {
    let border = if state.name_mode {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![Span::styled(
        state.name_buffer.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if state.name_mode {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    } else if state.name_buffer.is_empty() {
        spans.push(Span::styled(
            "press n to enter a name",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Name "),
    );
    frame.render_widget(paragraph, area);
}

/// Text for one grid cell.
pub fn cell_text(club: &ClubView) -> String {
    let marker = if club.selected { '✓' } else { ' ' };
    match &club.taken_by {
        Some(holder) => format!("{marker} {} ({holder})", club.name),
        None => format!("{marker} {}", club.name),
    }
}

/// Style for one grid cell.
pub fn cell_style(club: &ClubView, under_cursor: bool) -> Style {
    let style = if club.selected {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else if club.taken_by.is_some() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    if under_cursor {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

/// Pad or truncate `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{truncated:<width$}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
