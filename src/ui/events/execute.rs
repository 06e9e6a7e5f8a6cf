//! Execute view handlers
//!
//! This module handles the "try it out" form:
//! - Editing parameter values inline
//! - Editing the JSON request body
//! - Validating and sending the request

use super::helpers::{apply, is_ctrl};
use super::Command;
use crate::actions::AppAction;
use crate::request::ExecutionRequest;
use crate::state::AppState;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Indentation inserted by Tab in the body editor
const BODY_INDENT: &str = "  ";

pub fn handle_execute_key(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
    match key.code {
        KeyCode::Enter | KeyCode::Char('e') => apply(state, AppAction::StartEditingRow),
        KeyCode::Char('x') => return handle_execute(state),
        _ => {}
    }
    None
}

/// Validate the form and build the request to send
fn handle_execute(state: &Arc<RwLock<AppState>>) -> Option<Command> {
    let s = state.read().unwrap();
    if s.request.executing {
        debug!("request already in progress");
        return None;
    }

    let endpoint = s.request.endpoint.clone()?;
    let form_key = s.request.form_key.clone()?;

    // Validate that all required path params are filled
    let missing = endpoint.missing_path_params(&s.request.config);
    let error = if !missing.is_empty() {
        Some(format!(
            "Missing required path parameter(s): {}",
            missing.join(", ")
        ))
    } else if s.api_base_url().is_none() {
        Some("Cannot execute: the specification defines no API server".to_string())
    } else {
        None
    };

    if let Some(message) = error {
        debug!(%message, "cannot execute");
        drop(s);
        apply(state, AppAction::SetErrorResponse(message));
        return None;
    }

    Some(Command::Execute(ExecutionRequest {
        form_key,
        base_url: s.api_base_url()?,
        config: s.request.config.clone(),
        endpoint,
    }))
}

/// Handle input while a parameter value is being edited
pub fn handle_param_input(key: KeyEvent, state: &Arc<RwLock<AppState>>) {
    match key.code {
        KeyCode::Enter => apply(state, AppAction::ConfirmParamEdit),
        KeyCode::Esc => apply(state, AppAction::CancelParamEdit),
        _ => {
            state.write().unwrap().ui.param_buffer.handle_key_event(key);
        }
    }
}

/// Handle input while the request body is being edited
pub fn handle_body_input(key: KeyEvent, state: &Arc<RwLock<AppState>>) {
    if is_ctrl(&key, 'f') {
        let result = state.write().unwrap().ui.body.format_json();
        if let Err(e) = result {
            apply(state, AppAction::Flash(e));
        }
        return;
    }

    match key.code {
        KeyCode::Esc => apply(state, AppAction::FinishBodyEdit),
        KeyCode::Enter => state.write().unwrap().ui.body.insert_newline(),
        KeyCode::Tab => state.write().unwrap().ui.body.insert_str(BODY_INDENT),
        _ => {
            state.write().unwrap().ui.body.handle_key_event(key);
        }
    }
}
