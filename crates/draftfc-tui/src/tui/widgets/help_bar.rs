// Help bar and notice line.
//
// The notice row shows the last rejected command in red; the help row lists
// the keys that work on the current screen.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use draftfc_app::protocol::Screen;

use crate::tui::ViewState;

/// Render the notice line and the help bar.
pub fn render(frame: &mut Frame, notice_area: Rect, help_area: Rect, state: &ViewState) {
    if let Some(notice) = &state.notice {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            format!(" ! {notice}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(paragraph, notice_area);
    }

    let paragraph = Paragraph::new(Line::from(Span::styled(
        help_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, help_area);
}

/// Key hints for the current screen and mode.
pub fn help_text(state: &ViewState) -> &'static str {
    if state.name_mode {
        return " type name | Backspace:Delete | Enter/Tab/Esc:Done | Ctrl+C:Quit";
    }
    match state.screen() {
        Screen::Home => " Up/+:More players | Down/-:Fewer | Enter:Start | q:Quit",
        Screen::ClubSelection => {
            " Arrows:Move | Space:Select club | n:Name | Enter:Next | Esc:Back | q:Quit"
        }
        Screen::Auction => " s:Spin | p:Pick player | r:Reset | b:Bidding | h:Home | q:Quit",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::fixtures;
    use crate::tui::widgets::buffer_text;

    #[test]
    fn help_text_follows_screen() {
        let mut state = ViewState::default();
        assert!(help_text(&state).contains("Enter:Start"));

        state.apply_snapshot(fixtures::snapshot(Screen::ClubSelection));
        assert!(help_text(&state).contains("Space:Select club"));

        state.name_mode = true;
        assert!(help_text(&state).contains("type name"));

        state.apply_snapshot(fixtures::snapshot(Screen::Auction));
        assert!(help_text(&state).contains("s:Spin"));
    }

    #[test]
    fn notice_is_rendered() {
        let backend = ratatui::backend::TestBackend::new(80, 2);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.notice = Some("please select a club".into());
        terminal
            .draw(|frame| {
                let area = frame.area();
                let notice = Rect::new(area.x, area.y, area.width, 1);
                let help = Rect::new(area.x, area.y + 1, area.width, 1);
                render(frame, notice, help, &state);
            })
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("please select a club"));
        assert!(text.contains("q:Quit"));
    }
}
