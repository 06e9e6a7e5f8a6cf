//! Chooser input: the specification URL and theme fields

use super::helpers::apply;
use super::Command;
use crate::actions::{apply_action, AppAction};
use crate::config;
use crate::state::{AppState, ChooserField};
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::{Arc, RwLock};
use tracing::debug;

pub fn handle_chooser_input(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => apply(state, AppAction::ToggleChooserField),
        KeyCode::Enter => return submit(state),
        KeyCode::Esc => {
            let can_go_back = state.read().unwrap().shell.history().can_go_back();
            let action = if can_go_back {
                AppAction::Back
            } else {
                AppAction::BlurChooser
            };
            apply(state, action);
        }
        _ => {
            let mut s = state.write().unwrap();
            match s.ui.chooser_field {
                ChooserField::Url => s.ui.chooser_url.handle_key_event(key),
                ChooserField::Theme => s.ui.chooser_theme.handle_key_event(key),
            };
        }
    }
    None
}

/// Validate the URL field and start loading it
fn submit(state: &Arc<RwLock<AppState>>) -> Option<Command> {
    let mut s = state.write().unwrap();
    let url = s.ui.chooser_url.content().trim().to_string();
    let theme = Some(s.ui.chooser_theme.content().trim().to_string()).filter(|t| !t.is_empty());

    if let Err(e) = config::validate_url(&url) {
        debug!(url = %url, error = %e, "rejected specification URL");
        apply_action(AppAction::SetChooserHint(Some(e)), &mut s);
        return None;
    }

    apply_action(AppAction::SetChooserHint(None), &mut s);
    let ticket = s.shell.begin_load(url, theme);
    s.sync_ui();
    Some(Command::Load(ticket))
}
