use crate::config::ShellProps;
use crate::editor::TextEditor;
use crate::router::Screen;
use crate::shell::Shell;
use crate::swagger::parse::{
    api_base_url, endpoints_under, find_endpoint, path_groups, PathGroup,
};
use crate::types::{ApiEndpoint, ApiResponse, RequestConfig, SpecDocument};
use std::sync::Arc;

/// Everything the UI loop and background tasks share, behind one lock
#[derive(Debug)]
pub struct AppState {
    pub shell: Shell,
    pub ui: UiState,
    pub request: RequestState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    /// Typing into the chooser form
    Choosing,
    Searching,
    EditingParam,
    EditingBody,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChooserField {
    Url,
    Theme,
}

/// Interaction state of the views; none of it is part of the shell contract
#[derive(Debug, Clone)]
pub struct UiState {
    pub input_mode: InputMode,

    pub chooser_url: TextEditor,
    pub chooser_theme: TextEditor,
    pub chooser_field: ChooserField,
    /// Validation message shown before a load is attempted
    pub chooser_hint: Option<String>,

    pub search: TextEditor,
    /// Groups of the loaded document, rebuilt when a new one arrives
    pub groups: Vec<PathGroup>,
    /// Index into the filtered group list
    pub selected_group: usize,

    /// Index into the operations of the endpoint detail view
    pub selected_operation: usize,

    /// Index into the execute form rows (parameters, then body)
    pub selected_row: usize,
    pub param_buffer: TextEditor,
    pub body: TextEditor,

    /// Vertical scroll of the active screen, in lines
    pub scroll: u16,

    /// Short-lived status message (e.g. after copying a link)
    pub flash: Option<String>,

    /// Location and document the UI state was last synced against
    last_location: Option<String>,
    last_document: Option<Arc<SpecDocument>>,
    /// Execute forms built so far; part of every form key
    forms_built: u64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            input_mode: InputMode::Normal,
            chooser_url: TextEditor::new(),
            chooser_theme: TextEditor::new(),
            chooser_field: ChooserField::Url,
            chooser_hint: None,
            search: TextEditor::new(),
            groups: Vec::new(),
            selected_group: 0,
            selected_operation: 0,
            selected_row: 0,
            param_buffer: TextEditor::new(),
            body: TextEditor::new(),
            scroll: 0,
            flash: None,
            last_location: None,
            last_document: None,
            forms_built: 0,
        }
    }
}

/// The "try it out" form and its last response
#[derive(Debug, Clone, Default)]
pub struct RequestState {
    /// Identity of the form (location plus build count); responses for other
    /// forms are dropped
    pub form_key: Option<String>,
    pub endpoint: Option<ApiEndpoint>,
    pub config: RequestConfig,
    pub executing: bool,
    pub response: Option<ApiResponse>,
}

impl AppState {
    pub fn new(props: ShellProps, initial_location: &str) -> Self {
        Self {
            shell: Shell::new(props, initial_location),
            ui: UiState::default(),
            request: RequestState::default(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.shell.screen()
    }

    /// Groups matching the current search query
    pub fn filtered_groups(&self) -> Vec<&PathGroup> {
        let query = self.ui.search.content();
        self.ui.groups.iter().filter(|g| g.matches(query)).collect()
    }

    pub fn selected_group(&self) -> Option<&PathGroup> {
        self.filtered_groups().get(self.ui.selected_group).copied()
    }

    /// Operations shown by the endpoint detail view for `path`
    pub fn detail_endpoints(&self, path: Option<&str>) -> Vec<ApiEndpoint> {
        match (&self.shell.view().data, path) {
            (Some(data), Some(path)) => endpoints_under(data, path),
            _ => Vec::new(),
        }
    }

    /// Base URL requests from the execute form are sent to
    pub fn api_base_url(&self) -> Option<String> {
        let view = self.shell.view();
        view.data
            .as_ref()
            .and_then(|data| api_base_url(data, view.origin.as_deref()))
    }

    /// Bring the per-screen state in line with the shell after any change
    ///
    /// A new document rebuilds the group list; a new location resets the
    /// selection and, on detail screens, scrolls back to the top.
    pub fn sync_ui(&mut self) {
        let data = self.shell.view().data.clone();
        let same_document = match (&data, &self.ui.last_document) {
            (Some(current), Some(last)) => Arc::ptr_eq(current, last),
            (None, None) => true,
            _ => false,
        };
        if !same_document {
            self.ui.groups = data.as_deref().map(path_groups).unwrap_or_default();
            self.ui.last_document = data;
            self.ui.selected_group = 0;
            self.ui.search.clear();
        }

        let href = self.shell.history().href();
        if self.ui.last_location.as_deref() == Some(href.as_str()) {
            return;
        }
        self.ui.last_location = Some(href.clone());

        let screen = self.screen();
        if screen.scrolls_to_top() {
            self.ui.scroll = 0;
        }

        match screen {
            Screen::Chooser => {
                let view = self.shell.view();
                self.ui.chooser_url
                    .set_content(view.url.clone().unwrap_or_default());
                self.ui.chooser_theme
                    .set_content(view.theme.clone().unwrap_or_default());
                self.ui.chooser_field = ChooserField::Url;
                self.ui.input_mode = InputMode::Choosing;
            }
            Screen::Endpoint { .. } => {
                self.ui.selected_operation = 0;
                self.ui.input_mode = InputMode::Normal;
            }
            Screen::Execute {
                method_name,
                path,
                sub_path,
            } => {
                self.reset_request_form(href, method_name, path, sub_path);
                self.ui.input_mode = InputMode::Normal;
            }
            _ => {
                if self.ui.input_mode != InputMode::Searching {
                    self.ui.input_mode = InputMode::Normal;
                }
            }
        }
    }

    fn reset_request_form(
        &mut self,
        href: String,
        method_name: Option<String>,
        path: Option<String>,
        sub_path: Option<String>,
    ) {
        let endpoint = match (&self.shell.view().data, method_name) {
            (Some(data), Some(method)) => sub_path
                .or(path)
                .and_then(|target| find_endpoint(data, &method, &target)),
            _ => None,
        };

        self.ui.forms_built += 1;
        self.request = RequestState {
            form_key: Some(format!("{href}#{}", self.ui.forms_built)),
            config: endpoint
                .as_ref()
                .map(RequestConfig::for_endpoint)
                .unwrap_or_default(),
            endpoint,
            executing: false,
            response: None,
        };
        self.ui.selected_row = 0;
        self.ui.param_buffer.clear();
        self.ui.body.clear();
    }

    /// Number of rows in the execute form (parameters plus the body row)
    pub fn form_rows(&self) -> usize {
        let body_row = self
            .request
            .endpoint
            .as_ref()
            .is_some_and(|e| e.supports_body());
        self.request.config.parameters.len() + usize::from(body_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::events::test_support::key;
    use crate::ui::{Command, EventHandler};
    use crossterm::event::KeyCode;
    use std::sync::RwLock;

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
        - {name: verbose, in: query}
  /users:
    get: {summary: List users}
"#;

    fn loaded(initial: &str) -> AppState {
        let mut state = AppState::new(ShellProps::default(), initial);
        let ticket = state.shell.begin_load("http://h/spec.yaml".to_string(), None);
        state.sync_ui();
        let doc: SpecDocument = serde_yaml::from_str(SPEC).unwrap();
        state.shell.finish_load(&ticket, Ok(doc));
        state.sync_ui();
        state
    }

    #[test]
    fn test_sync_builds_groups_for_new_document() {
        let state = loaded("/");
        let names: Vec<&str> = state.ui.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["/pets", "/users"]);
    }

    #[test]
    fn test_filtered_groups_follow_search() {
        let mut state = loaded("/");
        state.ui.search.set_content("user");
        let groups = state.filtered_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "/users");
        assert_eq!(state.selected_group().map(|g| g.name.as_str()), Some("/users"));
    }

    #[test]
    fn test_execute_location_builds_form() {
        let mut state = loaded("/");
        state
            .shell
            .navigate("/execute?methodName=get&path=%2Fpets&subPath=%2Fpets%2F%7BpetId%7D");
        state.sync_ui();

        let endpoint = state.request.endpoint.as_ref().unwrap();
        assert_eq!(endpoint.path, "/pets/{petId}");
        assert_eq!(state.request.config.parameters.len(), 2);
        assert_eq!(state.form_rows(), 2);
    }

    #[test]
    fn test_execute_falls_back_to_path() {
        let mut state = loaded("/");
        state.shell.navigate("/execute?methodName=POST&path=%2Fpets");
        state.sync_ui();

        let endpoint = state.request.endpoint.as_ref().unwrap();
        assert_eq!(endpoint.method, "post");
        // no parameters, just the body row
        assert_eq!(state.form_rows(), 1);
    }

    #[test]
    fn test_execute_unknown_operation_has_empty_form() {
        let mut state = loaded("/");
        state.shell.navigate("/execute?methodName=delete&path=%2Fusers");
        state.sync_ui();

        assert!(state.request.endpoint.is_none());
        assert_eq!(state.form_rows(), 0);
    }

    #[test]
    fn test_detail_location_scrolls_to_top() {
        let mut state = loaded("/");
        state.ui.scroll = 12;
        state.ui.selected_operation = 3;
        state.shell.navigate("/endpoint?path=%2Fpets");
        state.sync_ui();

        assert_eq!(state.ui.scroll, 0);
        assert_eq!(state.ui.selected_operation, 0);
        assert_eq!(state.detail_endpoints(Some("/pets")).len(), 3);
    }

    #[test]
    fn test_same_location_keeps_scroll() {
        let mut state = loaded("/");
        state.shell.navigate("/endpoint?path=%2Fpets");
        state.sync_ui();
        state.ui.scroll = 7;
        state.sync_ui();
        assert_eq!(state.ui.scroll, 7);
    }

    #[test]
    fn test_api_base_url_uses_load_origin() {
        let state = loaded("/");
        // No servers or host in the document: requests go to the origin
        assert_eq!(state.api_base_url().as_deref(), Some("http://h"));
    }

    #[test]
    fn test_chooser_is_prefilled_after_failed_load() {
        let mut state = AppState::new(ShellProps::default(), "/");
        state.shell.mount();
        let ticket = state
            .shell
            .begin_load("http://bad/spec.yaml".to_string(), Some("hpe".to_string()));
        let err = serde_yaml::from_str::<SpecDocument>("[]").unwrap_err();
        state.shell.finish_load(&ticket, Err(err.into()));
        state.sync_ui();

        assert_eq!(state.ui.input_mode, InputMode::Choosing);
        assert_eq!(state.ui.chooser_url.content(), "http://bad/spec.yaml");
        assert_eq!(state.ui.chooser_theme.content(), "hpe");
    }

    #[test]
    fn test_groups_listed_after_chooser_submit_and_load() {
        let mut state = AppState::new(ShellProps::default(), "/");
        assert!(state.shell.mount().is_none());
        state.sync_ui();
        state.ui.chooser_url.set_content("http://h/spec.yaml");
        let state = Arc::new(RwLock::new(state));
        let mut handler = EventHandler::new();

        let Some(Command::Load(ticket)) = handler.handle_key(key(KeyCode::Enter), &state) else {
            panic!("expected a load command");
        };
        {
            let mut s = state.write().unwrap();
            assert_eq!(s.screen(), Screen::Loading);
            assert!(s.filtered_groups().is_empty());

            let doc: SpecDocument = serde_yaml::from_str(SPEC).unwrap();
            assert!(s.shell.finish_load(&ticket, Ok(doc)));
            s.sync_ui();
            assert_eq!(s.screen(), Screen::Endpoints);
            let groups = s.filtered_groups();
            let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
            assert_eq!(names, vec!["/pets", "/users"]);
        }

        handler.handle_key(key(KeyCode::Enter), &state);
        let s = state.read().unwrap();
        let location = s.shell.history().location();
        assert_eq!(location.pathname, "/endpoint");
        assert_eq!(location.query().get("path"), Some("/pets"));
        assert_eq!(location.query().get("url"), Some("http://h/spec.yaml"));
    }

    #[test]
    fn test_groups_rebuilt_for_each_loaded_document() {
        let mut state = loaded("/");
        state.ui.search.set_content("pets");
        state.sync_ui();
        // Same document: the filter survives
        assert_eq!(state.ui.search.content(), "pets");

        let ticket = state.shell.begin_load("http://h/other.yaml".to_string(), None);
        state.sync_ui();
        assert!(state.ui.groups.is_empty());

        let doc: SpecDocument =
            serde_yaml::from_str("info: {title: Other}\npaths:\n  /orders:\n    get: {}\n").unwrap();
        state.shell.finish_load(&ticket, Ok(doc));
        state.sync_ui();
        let names: Vec<&str> = state.ui.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["/orders"]);
        assert!(state.ui.search.is_empty());
    }

    #[test]
    fn test_revisited_execute_location_gets_new_form_key() {
        let mut state = loaded("/");
        let target = "/execute?methodName=get&path=%2Fusers";
        state.shell.navigate(target);
        state.sync_ui();
        let first_href = state.shell.history().href();
        let first_key = state.request.form_key.clone();

        state.shell.navigate("/");
        state.sync_ui();
        state.shell.navigate(target);
        state.sync_ui();

        assert_eq!(state.shell.history().href(), first_href);
        assert!(state.request.form_key.is_some());
        assert_ne!(state.request.form_key, first_key);
    }
}
