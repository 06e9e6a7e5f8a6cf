//! Endpoint list handlers
//!
//! This module handles the path group list:
//! - Opening a group in the detail view
//! - Searching/filtering groups
//! - Unloading the specification

use super::helpers::apply;
use crate::actions::AppAction;
use crate::location::link;
use crate::state::AppState;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::{Arc, RwLock};
use tracing::debug;

pub fn handle_endpoints_key(key: KeyEvent, state: &Arc<RwLock<AppState>>) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => handle_open_group(state),
        KeyCode::Char('/') => apply(state, AppAction::EnterSearchMode),
        KeyCode::Char('u') => handle_unload(state),
        _ => {}
    }
}

/// Navigate to the detail view of the selected group
fn handle_open_group(state: &Arc<RwLock<AppState>>) {
    let target = {
        let s = state.read().unwrap();
        let Some(group) = s.selected_group() else {
            return;
        };
        link(
            "/endpoint",
            &s.shell.view().context_search,
            &[("path", group.name.as_str())],
        )
    };

    debug!(%target, "opening path group");
    apply(state, AppAction::Navigate(target));
}

fn handle_unload(state: &Arc<RwLock<AppState>>) {
    let can_unload = state.read().unwrap().shell.can_unload();
    if can_unload {
        apply(state, AppAction::Unload);
    } else {
        apply(
            state,
            AppAction::Flash("The specification URL is fixed by configuration".to_string()),
        );
    }
}

/// Handle search input
pub fn handle_search_input(key: KeyEvent, state: &Arc<RwLock<AppState>>) {
    match key.code {
        // Exit search mode and keep the filter active
        KeyCode::Enter => apply(state, AppAction::ExitSearchMode { keep_filter: true }),
        KeyCode::Esc => apply(state, AppAction::ExitSearchMode { keep_filter: false }),
        _ => {
            let changed = state.write().unwrap().ui.search.handle_key_event(key);
            if changed {
                apply(state, AppAction::ResetGroupSelection);
            }
        }
    }
}
