use crate::router::Screen;
use crate::state::{AppState, ChooserField, InputMode};
use crate::types::ApiResponse;
use tracing::debug;

/// Lines moved per scroll action
pub const SCROLL_LINES: u16 = 5;

/// Represents all state-changing actions triggered from the keyboard
///
/// Input handling decides *which* action to take; `apply_action` is the only
/// place that performs it.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Routing
    Navigate(String),
    Back,
    Unload,

    // Selection within the current screen
    SelectNext,
    SelectPrevious,
    ScrollUp,
    ScrollDown,

    // Chooser
    FocusChooser,
    BlurChooser,
    ToggleChooserField,
    SetChooserHint(Option<String>),

    // Endpoint list search
    EnterSearchMode,
    ExitSearchMode { keep_filter: bool },
    ResetGroupSelection,

    // Execute form
    StartEditingRow,
    ConfirmParamEdit,
    CancelParamEdit,
    FinishBodyEdit,
    SetErrorResponse(String),

    // Feedback
    Flash(String),
    ClearFlash,
}

/// Apply an action to the application state
pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        AppAction::Navigate(to) => {
            state.shell.navigate(&to);
            state.sync_ui();
        }
        AppAction::Back => {
            if state.shell.back() {
                state.sync_ui();
            }
        }
        AppAction::Unload => {
            if state.shell.can_unload() {
                state.shell.unload();
                state.sync_ui();
            }
        }

        AppAction::SelectNext => {
            let count = selectable_count(state);
            let selected = selection_mut(state);
            if let Some(selected) = selected {
                if *selected + 1 < count {
                    *selected += 1;
                }
            }
            reset_detail_scroll(state);
        }
        AppAction::SelectPrevious => {
            if let Some(selected) = selection_mut(state) {
                *selected = selected.saturating_sub(1);
            }
            reset_detail_scroll(state);
        }
        AppAction::ScrollUp => {
            state.ui.scroll = state.ui.scroll.saturating_sub(SCROLL_LINES);
        }
        AppAction::ScrollDown => {
            state.ui.scroll = state.ui.scroll.saturating_add(SCROLL_LINES);
        }

        AppAction::FocusChooser => {
            state.ui.input_mode = InputMode::Choosing;
        }
        AppAction::BlurChooser => {
            state.ui.input_mode = InputMode::Normal;
        }
        AppAction::ToggleChooserField => {
            state.ui.chooser_field = match state.ui.chooser_field {
                ChooserField::Url => ChooserField::Theme,
                ChooserField::Theme => ChooserField::Url,
            };
        }
        AppAction::SetChooserHint(hint) => {
            state.ui.chooser_hint = hint;
        }

        AppAction::EnterSearchMode => {
            state.ui.input_mode = InputMode::Searching;
        }
        AppAction::ExitSearchMode { keep_filter } => {
            state.ui.input_mode = InputMode::Normal;
            if !keep_filter {
                state.ui.search.clear();
                state.ui.selected_group = 0;
            }
        }
        AppAction::ResetGroupSelection => {
            state.ui.selected_group = 0;
        }

        AppAction::StartEditingRow => {
            let row = state.ui.selected_row;
            if let Some(param) = state.request.config.parameters.get(row) {
                let value = param.value.clone();
                state.ui.param_buffer.set_content(value);
                state.ui.input_mode = InputMode::EditingParam;
            } else if row < state.form_rows() {
                let body = state.request.config.body.clone();
                state.ui.body.set_content(body);
                state.ui.input_mode = InputMode::EditingBody;
            }
        }
        AppAction::ConfirmParamEdit => {
            let value = state.ui.param_buffer.content().to_string();
            state
                .request
                .config
                .set_param_value(state.ui.selected_row, value);
            state.ui.param_buffer.clear();
            state.ui.input_mode = InputMode::Normal;
        }
        AppAction::CancelParamEdit => {
            state.ui.param_buffer.clear();
            state.ui.input_mode = InputMode::Normal;
        }
        AppAction::FinishBodyEdit => {
            state.request.config.body = state.ui.body.content().to_string();
            state.ui.input_mode = InputMode::Normal;
        }
        AppAction::SetErrorResponse(message) => {
            state.request.response = Some(ApiResponse::error(message));
        }

        AppAction::Flash(message) => {
            debug!(%message, "flash");
            state.ui.flash = Some(message);
        }
        AppAction::ClearFlash => {
            state.ui.flash = None;
        }
    }
}

/// Number of selectable rows on the current screen
fn selectable_count(state: &AppState) -> usize {
    match state.screen() {
        Screen::Endpoints => state.filtered_groups().len(),
        Screen::Endpoint { path } => state.detail_endpoints(path.as_deref()).len(),
        Screen::Execute { .. } => state.form_rows(),
        _ => 0,
    }
}

/// The detail view scrolls relative to the selected operation
fn reset_detail_scroll(state: &mut AppState) {
    if matches!(state.screen(), Screen::Endpoint { .. }) {
        state.ui.scroll = 0;
    }
}

fn selection_mut(state: &mut AppState) -> Option<&mut usize> {
    match state.screen() {
        Screen::Endpoints => Some(&mut state.ui.selected_group),
        Screen::Endpoint { .. } => Some(&mut state.ui.selected_operation),
        Screen::Execute { .. } => Some(&mut state.ui.selected_row),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShellProps;
    use crate::types::SpecDocument;

    const SPEC: &str = r#"
info: {title: Petstore}
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

    fn create_test_state(props: ShellProps) -> AppState {
        let mut state = AppState::new(props, "/");
        state.shell.mount();
        let ticket = state.shell.begin_load("http://h/spec.yaml".to_string(), None);
        let doc: SpecDocument = serde_yaml::from_str(SPEC).unwrap();
        state.shell.finish_load(&ticket, Ok(doc));
        state.sync_ui();
        state
    }

    #[test]
    fn test_select_next_stops_at_last_group() {
        let mut state = create_test_state(ShellProps::default());
        for _ in 0..10 {
            apply_action(AppAction::SelectNext, &mut state);
        }
        assert_eq!(state.ui.selected_group, 2);

        apply_action(AppAction::SelectPrevious, &mut state);
        assert_eq!(state.ui.selected_group, 1);
    }

    #[test]
    fn test_select_previous_saturates() {
        let mut state = create_test_state(ShellProps::default());
        apply_action(AppAction::SelectPrevious, &mut state);
        assert_eq!(state.ui.selected_group, 0);
    }

    #[test]
    fn test_navigate_and_back() {
        let mut state = create_test_state(ShellProps::default());
        apply_action(AppAction::Navigate("/endpoint?path=%2Fpets".into()), &mut state);
        assert!(matches!(state.screen(), Screen::Endpoint { .. }));

        apply_action(AppAction::SelectNext, &mut state);
        apply_action(AppAction::SelectNext, &mut state);
        apply_action(AppAction::SelectNext, &mut state);
        assert_eq!(state.ui.selected_operation, 2);

        apply_action(AppAction::ScrollDown, &mut state);
        apply_action(AppAction::SelectPrevious, &mut state);
        assert_eq!(state.ui.scroll, 0);

        apply_action(AppAction::Back, &mut state);
        assert_eq!(state.screen(), Screen::Endpoints);
    }

    #[test]
    fn test_unload_goes_to_chooser() {
        let mut state = create_test_state(ShellProps::default());
        apply_action(AppAction::Unload, &mut state);
        assert_eq!(state.screen(), Screen::Chooser);
        assert_eq!(state.ui.input_mode, InputMode::Choosing);
        assert!(state.ui.groups.is_empty());
    }

    #[test]
    fn test_unload_ignored_with_fixed_url() {
        let props = ShellProps {
            url: Some("http://h/spec.yaml".to_string()),
            ..Default::default()
        };
        let mut state = create_test_state(props);
        apply_action(AppAction::Unload, &mut state);
        assert!(state.shell.view().data.is_some());
    }

    #[test]
    fn test_scroll_actions() {
        let mut state = create_test_state(ShellProps::default());
        apply_action(AppAction::ScrollDown, &mut state);
        apply_action(AppAction::ScrollDown, &mut state);
        assert_eq!(state.ui.scroll, 10);
        apply_action(AppAction::ScrollUp, &mut state);
        apply_action(AppAction::ScrollUp, &mut state);
        apply_action(AppAction::ScrollUp, &mut state);
        assert_eq!(state.ui.scroll, 0);
    }

    #[test]
    fn test_toggle_chooser_field() {
        let mut state = create_test_state(ShellProps::default());
        apply_action(AppAction::ToggleChooserField, &mut state);
        assert_eq!(state.ui.chooser_field, ChooserField::Theme);
        apply_action(AppAction::ToggleChooserField, &mut state);
        assert_eq!(state.ui.chooser_field, ChooserField::Url);
    }

    #[test]
    fn test_search_exit_clears_filter() {
        let mut state = create_test_state(ShellProps::default());
        apply_action(AppAction::EnterSearchMode, &mut state);
        assert_eq!(state.ui.input_mode, InputMode::Searching);
        state.ui.search.set_content("store");
        assert_eq!(state.filtered_groups().len(), 1);

        apply_action(AppAction::ExitSearchMode { keep_filter: true }, &mut state);
        assert_eq!(state.ui.search.content(), "store");

        apply_action(AppAction::EnterSearchMode, &mut state);
        apply_action(AppAction::ExitSearchMode { keep_filter: false }, &mut state);
        assert!(state.ui.search.is_empty());
        assert_eq!(state.ui.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_param_editing_round_trip() {
        let mut state = create_test_state(ShellProps::default());
        apply_action(
            AppAction::Navigate("/execute?methodName=get&path=%2Fpets&subPath=%2Fpets%2F%7BpetId%7D".into()),
            &mut state,
        );

        apply_action(AppAction::StartEditingRow, &mut state);
        assert_eq!(state.ui.input_mode, InputMode::EditingParam);
        state.ui.param_buffer.set_content("42");
        apply_action(AppAction::ConfirmParamEdit, &mut state);

        assert_eq!(state.request.config.get_param_value("petId"), Some("42"));
        assert_eq!(state.ui.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_cancel_param_edit_keeps_value() {
        let mut state = create_test_state(ShellProps::default());
        apply_action(
            AppAction::Navigate("/execute?methodName=get&path=%2Fpets%2F%7BpetId%7D".into()),
            &mut state,
        );
        apply_action(AppAction::StartEditingRow, &mut state);
        state.ui.param_buffer.set_content("7");
        apply_action(AppAction::CancelParamEdit, &mut state);
        assert_eq!(state.request.config.get_param_value("petId"), Some(""));
    }

    #[test]
    fn test_body_row_editing() {
        let mut state = create_test_state(ShellProps::default());
        apply_action(
            AppAction::Navigate("/execute?methodName=post&path=%2Fstore&subPath=%2Fstore%2Forder".into()),
            &mut state,
        );
        assert_eq!(state.form_rows(), 1);

        apply_action(AppAction::StartEditingRow, &mut state);
        assert_eq!(state.ui.input_mode, InputMode::EditingBody);
        state.ui.body.set_content("{\"qty\": 1}");
        apply_action(AppAction::FinishBodyEdit, &mut state);
        assert_eq!(state.request.config.body, "{\"qty\": 1}");

        // Editing again starts from the saved body
        state.ui.body.clear();
        apply_action(AppAction::StartEditingRow, &mut state);
        assert_eq!(state.ui.body.content(), "{\"qty\": 1}");
    }

    #[test]
    fn test_start_editing_without_rows_does_nothing() {
        let mut state = create_test_state(ShellProps::default());
        apply_action(
            AppAction::Navigate("/execute?methodName=get&path=%2Fusers".into()),
            &mut state,
        );
        apply_action(AppAction::StartEditingRow, &mut state);
        assert_eq!(state.ui.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_flash() {
        let mut state = create_test_state(ShellProps::default());
        apply_action(AppAction::Flash("Copied".into()), &mut state);
        assert_eq!(state.ui.flash.as_deref(), Some("Copied"));
        apply_action(AppAction::ClearFlash, &mut state);
        assert!(state.ui.flash.is_none());
    }
}
