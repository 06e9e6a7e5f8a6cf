//! Helper functions for event handling

use crate::actions::{apply_action, AppAction};
use crate::state::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::{Arc, RwLock};

/// Apply a single action to state
pub fn apply(state: &Arc<RwLock<AppState>>, action: AppAction) {
    let mut s = state.write().unwrap();
    apply_action(action, &mut s);
}

/// True for `Ctrl+<c>`
pub fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ctrl() {
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert!(is_ctrl(&ctrl_d, 'd'));
        assert!(!is_ctrl(&ctrl_d, 'u'));
        assert!(!is_ctrl(&KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE), 'd'));
    }
}
