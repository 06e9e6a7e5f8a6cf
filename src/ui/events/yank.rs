//! Yank (copy) handlers
//!
//! `y` copies the current address (href) so the view can be shared;
//! `Y` on the execute view copies the pretty-printed response body.

use super::helpers::apply;
use crate::actions::AppAction;
use crate::state::AppState;
use crate::ui::draw::try_format_json;
use arboard::Clipboard;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Yank the current address to the clipboard
pub fn handle_yank_link(state: &Arc<RwLock<AppState>>) {
    let href = state.read().unwrap().shell.history().href();
    copy(state, href, "link");
}

/// Yank the last response body to the clipboard
pub fn handle_yank_response(state: &Arc<RwLock<AppState>>) {
    let body = {
        let s = state.read().unwrap();
        match &s.request.response {
            Some(response) if !response.is_error => try_format_json(&response.body),
            _ => {
                debug!("no response available to yank");
                return;
            }
        }
    };
    copy(state, body, "response");
}

fn copy(state: &Arc<RwLock<AppState>>, text: String, what: &str) {
    let result = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.clone()));
    let message = match result {
        Ok(()) => {
            debug!(what, len = text.len(), "yanked to clipboard");
            copied_message(what, &text)
        }
        Err(e) => {
            warn!(error = %e, "failed to copy to clipboard");
            format!("Clipboard unavailable: {e}")
        }
    };
    apply(state, AppAction::Flash(message));
}

/// Flash text after a successful copy; long values are shortened
fn copied_message(what: &str, text: &str) -> String {
    const MAX_PREVIEW: usize = 60;
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() > MAX_PREVIEW || text.contains('\n') {
        let preview: String = first_line.chars().take(MAX_PREVIEW).collect();
        format!("Copied {what}: {preview}...")
    } else {
        format!("Copied {what}: {text}")
    }
}
