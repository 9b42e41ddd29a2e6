use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use cv_base::state::{Phase, State};
use cv_mod_tabs::TabMove;

use crate::app::actions::Action;

/// Map a terminal event to an action. Returns None only for quit.
pub fn handle_event(event: &Event, state: &State) -> Option<Action> {
    match event {
        Event::Key(key) => {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

            // Ctrl+Q quits from any phase
            if ctrl && key.code == KeyCode::Char('q') {
                return None;
            }

            let action = match state.phase {
                Phase::Credentials => handle_form_key(key),
                Phase::Processing => match key.code {
                    KeyCode::Esc => Action::CancelProcessing,
                    _ => Action::None,
                },
                Phase::Result => handle_result_key(key),
            };
            Some(action)
        }
        // Bracketed paste goes to the focused form field
        // Normalize line endings: terminals may send \r\n or \r instead of \n
        Event::Paste(text) if state.phase == Phase::Credentials => {
            let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
            Some(Action::FormPaste(normalized))
        }
        Event::Resize(_, _) => Some(Action::Redraw),
        _ => Some(Action::None),
    }
}

fn handle_form_key(key: &KeyEvent) -> Action {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Tab if shift => Action::FormFocusPrev,
        KeyCode::Tab | KeyCode::Down => Action::FormFocusNext,
        KeyCode::BackTab | KeyCode::Up => Action::FormFocusPrev,
        KeyCode::Enter => Action::Submit,
        KeyCode::Backspace => Action::FormBackspace,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Action::FormInput(c),
        _ => Action::None,
    }
}

fn handle_result_key(key: &KeyEvent) -> Action {
    // Tab navigation first: arrows, Home/End, Enter/Space
    if let Some(mv) = TabMove::from_key(key) {
        return Action::Tab(mv);
    }
    match key.code {
        KeyCode::Char('c') => Action::CopyToken,
        KeyCode::Char('y') => Action::CopyResultJson,
        KeyCode::Char('e') => Action::ExportResult,
        KeyCode::Char('n') | KeyCode::Esc => Action::NewLookup,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn state_in(phase: Phase) -> State {
        let mut state = State::new();
        state.phase = phase;
        state
    }

    #[test]
    fn ctrl_q_quits_in_every_phase() {
        for phase in [Phase::Credentials, Phase::Processing, Phase::Result] {
            let state = state_in(phase);
            let event = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
            assert!(handle_event(&event, &state).is_none());
        }
    }

    #[test]
    fn typing_reaches_the_form_only_in_credentials_phase() {
        let typed = key(KeyCode::Char('a'));
        assert_eq!(handle_event(&typed, &state_in(Phase::Credentials)), Some(Action::FormInput('a')));
        assert_eq!(handle_event(&typed, &state_in(Phase::Processing)), Some(Action::None));
    }

    #[test]
    fn escape_cancels_while_processing() {
        assert_eq!(
            handle_event(&key(KeyCode::Esc), &state_in(Phase::Processing)),
            Some(Action::CancelProcessing)
        );
    }

    #[test]
    fn result_phase_routes_navigation_to_tabs() {
        let state = state_in(Phase::Result);
        assert_eq!(handle_event(&key(KeyCode::Right), &state), Some(Action::Tab(TabMove::Next)));
        assert_eq!(handle_event(&key(KeyCode::Home), &state), Some(Action::Tab(TabMove::First)));
        assert_eq!(handle_event(&key(KeyCode::Enter), &state), Some(Action::Tab(TabMove::Activate)));
        assert_eq!(handle_event(&key(KeyCode::Char('e')), &state), Some(Action::ExportResult));
        assert_eq!(handle_event(&key(KeyCode::Char('n')), &state), Some(Action::NewLookup));
    }

    #[test]
    fn paste_is_ignored_outside_the_form() {
        let paste = Event::Paste("secret\r\n".to_string());
        assert_eq!(
            handle_event(&paste, &state_in(Phase::Credentials)),
            Some(Action::FormPaste("secret\n".to_string()))
        );
        assert_eq!(handle_event(&paste, &state_in(Phase::Result)), Some(Action::None));
    }
}
