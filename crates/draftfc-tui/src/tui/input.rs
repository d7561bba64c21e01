// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// orchestrator, or into local ViewState mutations (club cursor, name entry).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use draftfc_app::protocol::{Screen, UserCommand};

use super::widgets::club_select::GRID_COLUMNS;
use super::ViewState;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator, `None` when it was handled locally or ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    view_state.notice = None;

    if view_state.name_mode {
        return handle_name_mode(key_event, view_state);
    }

    if key_event.code == KeyCode::Char('q') {
        return Some(UserCommand::Quit);
    }

    match view_state.screen() {
        Screen::Home => handle_home(key_event),
        Screen::ClubSelection => handle_club_selection(key_event, view_state),
        Screen::Auction => handle_auction(key_event),
    }
}

fn handle_home(key_event: KeyEvent) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Up | KeyCode::Char('+') => Some(UserCommand::IncrementPlayers),
        KeyCode::Down | KeyCode::Char('-') => Some(UserCommand::DecrementPlayers),
        KeyCode::Enter => Some(UserCommand::StartDraft),
        _ => None,
    }
}

fn handle_club_selection(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Left => {
            move_cursor(view_state, -1);
            None
        }
        KeyCode::Right => {
            move_cursor(view_state, 1);
            None
        }
        KeyCode::Up => {
            move_cursor(view_state, -(GRID_COLUMNS as isize));
            None
        }
        KeyCode::Down => {
            move_cursor(view_state, GRID_COLUMNS as isize);
            None
        }
        KeyCode::Char(' ') => view_state
            .club_under_cursor()
            .map(|club| UserCommand::SelectClub(club.id)),
        KeyCode::Char('n') | KeyCode::Tab => {
            view_state.name_mode = true;
            None
        }
        KeyCode::Enter => Some(UserCommand::NextPlayer),
        KeyCode::Esc | KeyCode::Backspace => Some(UserCommand::PreviousPlayer),
        _ => None,
    }
}

fn handle_auction(key_event: KeyEvent) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('s') | KeyCode::Char(' ') => Some(UserCommand::SpinWheel),
        KeyCode::Char('p') | KeyCode::Enter => Some(UserCommand::PickPlayer),
        KeyCode::Char('r') => Some(UserCommand::ResetWheel),
        KeyCode::Char('b') => Some(UserCommand::StartBidding),
        KeyCode::Esc | KeyCode::Char('h') => Some(UserCommand::BackToHome),
        _ => None,
    }
}

/// Handle key events while typing a participant name.
///
/// - Printable characters are appended to the name
/// - Backspace removes the last character
/// - Enter, Tab or Esc leave name entry
///
/// Every edit is mirrored to the app so its pending name stays current.
fn handle_name_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter | KeyCode::Tab | KeyCode::Esc => {
            view_state.name_mode = false;
            None
        }
        KeyCode::Backspace => {
            view_state.name_buffer.pop()?;
            Some(UserCommand::SetName(view_state.name_buffer.clone()))
        }
        KeyCode::Char(c) => {
            view_state.name_buffer.push(c);
            Some(UserCommand::SetName(view_state.name_buffer.clone()))
        }
        _ => None,
    }
}

/// Move the club cursor by `delta`, staying inside the grid.
fn move_cursor(view_state: &mut ViewState, delta: isize) {
    let len = view_state.clubs().len();
    if len == 0 {
        return;
    }
    let target = view_state.club_cursor as isize + delta;
    if (0..len as isize).contains(&target) {
        view_state.club_cursor = target as usize;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::fixtures;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    use draftfc_core::catalog::ClubId;

    /// Helper to create a KeyEvent with no modifiers.
    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    /// Helper to create a KeyEvent with Ctrl modifier.
    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn state_on(screen: Screen) -> ViewState {
        let mut state = ViewState::default();
        state.apply_snapshot(fixtures::snapshot(screen));
        state
    }

    // -- Home --

    #[test]
    fn home_keys_adjust_count_and_start() {
        let mut state = state_on(Screen::Home);
        assert_eq!(
            handle_key(key(KeyCode::Up), &mut state),
            Some(UserCommand::IncrementPlayers)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('+')), &mut state),
            Some(UserCommand::IncrementPlayers)
        );
        assert_eq!(
            handle_key(key(KeyCode::Down), &mut state),
            Some(UserCommand::DecrementPlayers)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('-')), &mut state),
            Some(UserCommand::DecrementPlayers)
        );
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::StartDraft)
        );
    }

    #[test]
    fn keys_before_first_snapshot_use_home_bindings() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::StartDraft)
        );
    }

    // -- Club selection --

    #[test]
    fn arrows_move_cursor_within_grid() {
        let mut state = state_on(Screen::ClubSelection);
        assert!(handle_key(key(KeyCode::Right), &mut state).is_none());
        assert_eq!(state.club_cursor, 1);
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.club_cursor, 1 + GRID_COLUMNS);
        handle_key(key(KeyCode::Up), &mut state);
        handle_key(key(KeyCode::Left), &mut state);
        assert_eq!(state.club_cursor, 0);
    }

    #[test]
    fn cursor_does_not_leave_grid() {
        let mut state = state_on(Screen::ClubSelection);
        handle_key(key(KeyCode::Left), &mut state);
        handle_key(key(KeyCode::Up), &mut state);
        assert_eq!(state.club_cursor, 0);

        state.club_cursor = 19;
        handle_key(key(KeyCode::Right), &mut state);
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.club_cursor, 19);
    }

    #[test]
    fn space_selects_club_under_cursor() {
        let mut state = state_on(Screen::ClubSelection);
        state.club_cursor = 4;
        let expected = state.clubs()[4].id;
        assert_eq!(
            handle_key(key(KeyCode::Char(' ')), &mut state),
            Some(UserCommand::SelectClub(expected))
        );
    }

    #[test]
    fn space_can_select_taken_club() {
        let mut state = state_on(Screen::ClubSelection);
        assert!(state.clubs()[0].taken_by.is_some());
        assert_eq!(
            handle_key(key(KeyCode::Char(' ')), &mut state),
            Some(UserCommand::SelectClub(ClubId(1)))
        );
    }

    #[test]
    fn enter_and_esc_navigate_slots() {
        let mut state = state_on(Screen::ClubSelection);
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::NextPlayer)
        );
        assert_eq!(
            handle_key(key(KeyCode::Esc), &mut state),
            Some(UserCommand::PreviousPlayer)
        );
        assert_eq!(
            handle_key(key(KeyCode::Backspace), &mut state),
            Some(UserCommand::PreviousPlayer)
        );
    }

    // -- Name entry --

    #[test]
    fn name_entry_mirrors_every_edit() {
        let mut state = state_on(Screen::ClubSelection);
        assert!(handle_key(key(KeyCode::Char('n')), &mut state).is_none());
        assert!(state.name_mode);

        assert_eq!(
            handle_key(key(KeyCode::Char('B')), &mut state),
            Some(UserCommand::SetName("B".into()))
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('o')), &mut state),
            Some(UserCommand::SetName("Bo".into()))
        );
        assert_eq!(
            handle_key(key(KeyCode::Backspace), &mut state),
            Some(UserCommand::SetName("B".into()))
        );
    }

    #[test]
    fn name_entry_backspace_on_empty_is_noop() {
        let mut state = state_on(Screen::ClubSelection);
        handle_key(key(KeyCode::Tab), &mut state);
        assert!(handle_key(key(KeyCode::Backspace), &mut state).is_none());
        assert!(state.name_mode);
    }

    #[test]
    fn q_in_name_entry_is_typed() {
        let mut state = state_on(Screen::ClubSelection);
        handle_key(key(KeyCode::Char('n')), &mut state);
        assert_eq!(
            handle_key(key(KeyCode::Char('q')), &mut state),
            Some(UserCommand::SetName("q".into()))
        );
    }

    #[test]
    fn enter_leaves_name_entry_without_advancing() {
        let mut state = state_on(Screen::ClubSelection);
        handle_key(key(KeyCode::Char('n')), &mut state);
        assert!(handle_key(key(KeyCode::Enter), &mut state).is_none());
        assert!(!state.name_mode);
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::NextPlayer)
        );
    }

    #[test]
    fn esc_leaves_name_entry_without_retreating() {
        let mut state = state_on(Screen::ClubSelection);
        handle_key(key(KeyCode::Tab), &mut state);
        assert!(handle_key(key(KeyCode::Esc), &mut state).is_none());
        assert!(!state.name_mode);
    }

    // -- Auction --

    #[test]
    fn auction_keys() {
        let mut state = state_on(Screen::Auction);
        let cases = [
            (KeyCode::Char('s'), UserCommand::SpinWheel),
            (KeyCode::Char(' '), UserCommand::SpinWheel),
            (KeyCode::Char('p'), UserCommand::PickPlayer),
            (KeyCode::Enter, UserCommand::PickPlayer),
            (KeyCode::Char('r'), UserCommand::ResetWheel),
            (KeyCode::Char('b'), UserCommand::StartBidding),
            (KeyCode::Esc, UserCommand::BackToHome),
            (KeyCode::Char('h'), UserCommand::BackToHome),
        ];
        for (code, expected) in cases {
            assert_eq!(
                handle_key(key(code), &mut state),
                Some(expected),
                "{code:?}"
            );
        }
    }

    // -- Quit and misc --

    #[test]
    fn q_quits_outside_name_entry() {
        for screen in [Screen::Home, Screen::ClubSelection, Screen::Auction] {
            let mut state = state_on(screen);
            assert_eq!(
                handle_key(key(KeyCode::Char('q')), &mut state),
                Some(UserCommand::Quit)
            );
        }
    }

    #[test]
    fn ctrl_c_quits_even_during_name_entry() {
        let mut state = state_on(Screen::ClubSelection);
        state.name_mode = true;
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn key_press_clears_notice() {
        let mut state = state_on(Screen::Auction);
        state.notice = Some("the wheel is already spinning".into());
        handle_key(key(KeyCode::Char('x')), &mut state);
        assert!(state.notice.is_none());
    }

    #[test]
    fn unknown_key_returns_none() {
        let mut state = state_on(Screen::Auction);
        assert!(handle_key(key(KeyCode::F(5)), &mut state).is_none());
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = state_on(Screen::Home);
        let mut release = key(KeyCode::Enter);
        release.kind = KeyEventKind::Release;
        assert!(handle_key(release, &mut state).is_none());

        let mut repeat = key(KeyCode::Enter);
        repeat.kind = KeyEventKind::Repeat;
        assert!(handle_key(repeat, &mut state).is_none());
    }
}
