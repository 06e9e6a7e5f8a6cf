//! Event handling for swagger-shell
//!
//! This module processes user input and translates it into state-changing actions.
//! Input is dispatched on the input mode first (text inputs swallow most keys),
//! then on the current screen:
//! - Choosing: the chooser's URL and theme fields
//! - Searching: filtering the endpoint list
//! - EditingParam / EditingBody: the execute form
//! - Normal: navigation and per-screen commands
//!
//! # Architecture
//!
//! The EventHandler uses an action pattern where input events generate AppActions
//! that are applied to AppState via the apply_action function in actions.rs.
//! Work that must run outside the lock (loading, executing) is returned to the
//! main loop as a `Command`.
//!
//! # Lock Management
//!
//! Handlers take short read or write locks on `Arc<RwLock<AppState>>` and never
//! hold one across a call that locks again.

mod chooser;
mod endpoint;
mod endpoints;
mod execute;
mod helpers;
mod yank;

use crate::actions::AppAction;
use crate::request::ExecutionRequest;
use crate::router::Screen;
use crate::shell::LoadTicket;
use crate::state::{AppState, InputMode};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use helpers::{apply, is_ctrl};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Background work requested by an input event
#[derive(Debug)]
pub enum Command {
    Load(LoadTicket),
    Execute(ExecutionRequest),
}

/// Event handler for managing user input and state updates
#[derive(Debug, Default)]
pub struct EventHandler {
    pub should_quit: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait briefly for one input event and dispatch it
    pub fn handle_events(&mut self, state: Arc<RwLock<AppState>>) -> Result<Option<Command>> {
        if !event::poll(Duration::from_millis(50))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(self.handle_key(key, &state)),
            _ => Ok(None),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
        if is_ctrl(&key, 'c') {
            self.should_quit = true;
            return None;
        }

        let (input_mode, screen, has_flash) = {
            let s = state.read().unwrap();
            (s.ui.input_mode.clone(), s.screen(), s.ui.flash.is_some())
        };
        if has_flash {
            apply(state, AppAction::ClearFlash);
        }

        // Only quitting is possible while a document loads
        if screen == Screen::Loading {
            if key.code == KeyCode::Char('q') && input_mode != InputMode::Choosing {
                self.should_quit = true;
            }
            return None;
        }

        match input_mode {
            InputMode::Choosing => chooser::handle_chooser_input(key, state),
            InputMode::Searching => {
                endpoints::handle_search_input(key, state);
                None
            }
            InputMode::EditingParam => {
                execute::handle_param_input(key, state);
                None
            }
            InputMode::EditingBody => {
                execute::handle_body_input(key, state);
                None
            }
            InputMode::Normal => self.handle_normal_key(key, state, screen),
        }
    }

    fn handle_normal_key(
        &mut self,
        key: KeyEvent,
        state: &Arc<RwLock<AppState>>,
        screen: Screen,
    ) -> Option<Command> {
        // Scrolling
        if is_ctrl(&key, 'd') || key.code == KeyCode::PageDown {
            apply(state, AppAction::ScrollDown);
            return None;
        }
        if is_ctrl(&key, 'u') || key.code == KeyCode::PageUp {
            apply(state, AppAction::ScrollUp);
            return None;
        }

        match key.code {
            // QUIT
            KeyCode::Char('q') => {
                self.should_quit = true;
                return None;
            }
            KeyCode::Char('y') => {
                yank::handle_yank_link(state);
                return None;
            }
            KeyCode::Char('Y') if matches!(screen, Screen::Execute { .. }) => {
                yank::handle_yank_response(state);
                return None;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                apply(state, AppAction::SelectNext);
                return None;
            }
            KeyCode::Char('k') | KeyCode::Up => {
                apply(state, AppAction::SelectPrevious);
                return None;
            }
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => {
                self.handle_back(state, &screen);
                return None;
            }
            _ => {}
        }

        match screen {
            Screen::Chooser => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char('i')) {
                    apply(state, AppAction::FocusChooser);
                }
                None
            }
            Screen::Endpoints => {
                endpoints::handle_endpoints_key(key, state);
                None
            }
            Screen::Endpoint { path } => {
                endpoint::handle_endpoint_key(key, state, path.as_deref());
                None
            }
            Screen::Execute { .. } => execute::handle_execute_key(key, state),
            Screen::Loading | Screen::Blank => None,
        }
    }

    /// Esc on a filtered list clears the filter; otherwise go back
    fn handle_back(&self, state: &Arc<RwLock<AppState>>, screen: &Screen) {
        let filtered = !state.read().unwrap().ui.search.is_empty();
        if *screen == Screen::Endpoints && filtered {
            apply(state, AppAction::ExitSearchMode { keep_filter: false });
        } else {
            apply(state, AppAction::Back);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::ShellProps;
    use crate::state::AppState;
    use crate::types::SpecDocument;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::{Arc, RwLock};

    const SPEC: &str = r#"
info: {title: Petstore, version: 1.0.0}
paths:
  /pets:
    get: {summary: List pets}
    post: {summary: Create pet}
  /pets/{petId}:
    get:
      summary: Show pet
      parameters:
        - {name: petId, in: path, required: true}
  /store/order:
    post: {summary: Place order}
  /users:
    get: {summary: List users}
"#;

    /// State with the pet store loaded from `http://h/spec.yaml`
    pub fn loaded_state(props: ShellProps) -> Arc<RwLock<AppState>> {
        let mut state = AppState::new(props, "/");
        let ticket = match state.shell.mount() {
            Some(ticket) => ticket,
            None => state.shell.begin_load("http://h/spec.yaml".to_string(), None),
        };
        // The main loop syncs while the load is in flight
        state.sync_ui();
        let doc: SpecDocument = serde_yaml::from_str(SPEC).unwrap();
        state.shell.finish_load(&ticket, Ok(doc));
        state.sync_ui();
        Arc::new(RwLock::new(state))
    }

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{key, loaded_state};
    use super::*;
    use crate::config::ShellProps;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_q_and_ctrl_c_quit() {
        let state = loaded_state(ShellProps::default());

        let mut handler = EventHandler::new();
        handler.handle_key(key(KeyCode::Char('q')), &state);
        assert!(handler.should_quit);

        let mut handler = EventHandler::new();
        handler.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &state);
        assert!(handler.should_quit);
    }

    #[test]
    fn test_ctrl_u_scrolls_instead_of_unloading() {
        let state = loaded_state(ShellProps::default());
        let mut handler = EventHandler::new();

        handler.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL), &state);
        assert_eq!(state.read().unwrap().ui.scroll, crate::actions::SCROLL_LINES);

        handler.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL), &state);
        let s = state.read().unwrap();
        assert_eq!(s.ui.scroll, 0);
        assert_eq!(s.screen(), Screen::Endpoints);
    }

    #[test]
    fn test_open_and_go_back() {
        let state = loaded_state(ShellProps::default());
        let mut handler = EventHandler::new();

        handler.handle_key(key(KeyCode::Enter), &state);
        assert!(matches!(state.read().unwrap().screen(), Screen::Endpoint { .. }));

        handler.handle_key(key(KeyCode::Esc), &state);
        assert_eq!(state.read().unwrap().screen(), Screen::Endpoints);
    }

    #[test]
    fn test_esc_clears_filter_before_going_back() {
        let state = loaded_state(ShellProps::default());
        state.write().unwrap().ui.search.set_content("pets");
        let mut handler = EventHandler::new();

        handler.handle_key(key(KeyCode::Esc), &state);

        let s = state.read().unwrap();
        assert!(s.ui.search.is_empty());
        assert_eq!(s.screen(), Screen::Endpoints);
    }

    #[test]
    fn test_loading_screen_ignores_navigation() {
        let state = loaded_state(ShellProps::default());
        state
            .write()
            .unwrap()
            .shell
            .begin_load("http://h/other.yaml".to_string(), None);
        let mut handler = EventHandler::new();

        assert!(handler.handle_key(key(KeyCode::Char('u')), &state).is_none());
        assert_eq!(state.read().unwrap().screen(), Screen::Loading);

        handler.handle_key(key(KeyCode::Char('q')), &state);
        assert!(handler.should_quit);
    }

    #[test]
    fn test_any_key_clears_flash() {
        let state = loaded_state(ShellProps::default());
        apply(&state, AppAction::Flash("Copied".to_string()));
        let mut handler = EventHandler::new();

        handler.handle_key(key(KeyCode::Down), &state);

        let s = state.read().unwrap();
        assert!(s.ui.flash.is_none());
        assert_eq!(s.ui.selected_group, 1);
    }
}
