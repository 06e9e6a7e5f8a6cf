use super::helpers::apply;
use crate::actions::AppAction;
use crate::location::link;
use crate::state::AppState;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::{Arc, RwLock};

pub fn handle_endpoint_key(key: KeyEvent, state: &Arc<RwLock<AppState>>, path: Option<&str>) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right) {
        handle_try_it(state, path);
    }
}

/// Open the execute view for the selected operation
fn handle_try_it(state: &Arc<RwLock<AppState>>, path: Option<&str>) {
    let action = {
        let s = state.read().unwrap();
        if !s.shell.props().executable {
            AppAction::Flash("Execution is disabled".to_string())
        } else {
            let endpoints = s.detail_endpoints(path);
            let Some(endpoint) = endpoints.get(s.ui.selected_operation) else {
                return;
            };
            let target = link(
                "/execute",
                &s.shell.view().context_search,
                &[
                    ("methodName", endpoint.method.as_str()),
                    ("path", path.unwrap_or(endpoint.path.as_str())),
                    ("subPath", endpoint.path.as_str()),
                ],
            );
            AppAction::Navigate(target)
        }
    };

    apply(state, action);
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{key, loaded_state};
    use super::*;
    use crate::config::ShellProps;
    use crate::router::Screen;

    #[test]
    fn test_enter_opens_execute_for_selected_operation() {
        let state = loaded_state(ShellProps::default());
        apply(&state, AppAction::Navigate("/endpoint?path=%2Fpets".to_string()));
        apply(&state, AppAction::SelectNext);
        apply(&state, AppAction::SelectNext);

        handle_endpoint_key(key(KeyCode::Enter), &state, Some("/pets"));

        let s = state.read().unwrap();
        assert_eq!(
            s.screen(),
            Screen::Execute {
                method_name: Some("get".to_string()),
                path: Some("/pets".to_string()),
                sub_path: Some("/pets/{petId}".to_string()),
            }
        );
        assert_eq!(s.request.endpoint.as_ref().unwrap().path, "/pets/{petId}");
    }

    #[test]
    fn test_not_executable_flashes() {
        let props = ShellProps {
            executable: false,
            ..Default::default()
        };
        let state = loaded_state(props);
        apply(&state, AppAction::Navigate("/endpoint?path=%2Fpets".to_string()));

        handle_endpoint_key(key(KeyCode::Enter), &state, Some("/pets"));

        let s = state.read().unwrap();
        assert!(matches!(s.screen(), Screen::Endpoint { .. }));
        assert_eq!(s.ui.flash.as_deref(), Some("Execution is disabled"));
    }
}
