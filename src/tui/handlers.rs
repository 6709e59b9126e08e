// File: src/tui/handlers.rs
// Handles keyboard input and network events for the TUI.
use crate::model::Category;
use crate::tui::action::{Action, AppEvent};
use crate::tui::state::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_app_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Status(s) => {
            state.loading = s.ends_with("...");
            state.message = s;
        }
        AppEvent::Error(s) => {
            state.message = format!("Error: {}", s);
            state.loading = false;
            state.offline = true;
        }
        AppEvent::DashboardLoaded(board) => state.set_dashboard(board),
    }
}

/// Applies a key press to the UI state. Returns the action for the network
/// actor (or the loop) when the key asks for one.
pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('r') | KeyCode::F(5) => {
            if state.loading || state.offline {
                return None;
            }
            state.loading = true;
            state.message = "Refreshing...".to_string();
            return Some(Action::Refresh);
        }
        KeyCode::Tab | KeyCode::BackTab => state.next_tab(),
        KeyCode::Char('1') => state.select_tab(Category::Announcements),
        KeyCode::Char('2') => state.select_tab(Category::Assignments),
        KeyCode::Down | KeyCode::Char('j') => state.next(),
        KeyCode::Up | KeyCode::Char('k') => state.previous(),
        KeyCode::Home | KeyCode::Char('g') => state.table_state.select(Some(0)),
        KeyCode::End | KeyCode::Char('G') => {
            let len = state.visible_rows().len();
            state.table_state.select(Some(len.saturating_sub(1)));
        }
        KeyCode::Char('?') => state.show_full_help = !state.show_full_help,
        _ => {}
    }
    None
}
