//! UI drawing module
//!
//! One submodule per screen plus shared pieces:
//! - `components`: header, footer, inputs, empty states
//! - `styling`: theme palettes and color helpers
//! - `chooser`, `endpoints`, `endpoint`, `execute`, `loading`: the screens

mod chooser;
mod components;
mod endpoint;
mod endpoints;
mod execute;
mod loading;
mod styling;

pub use execute::try_format_json;
pub use loading::SPINNER;

use crate::router::Screen;
use crate::state::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};
use styling::Theme;

/// Draw the whole frame for the current screen
pub fn render(frame: &mut Frame, state: &AppState, spinner_index: usize) {
    let theme = Theme::resolve(state.shell.view().theme.as_deref());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    components::render_header(frame, chunks[0], state, &theme);

    match state.screen() {
        Screen::Loading => loading::render_loading(frame, chunks[1], state, spinner_index, &theme),
        Screen::Blank => {}
        Screen::Chooser => chooser::render_chooser(frame, chunks[1], state, &theme),
        Screen::Endpoints => endpoints::render_endpoint_list(frame, chunks[1], state, &theme),
        Screen::Endpoint { path } => {
            endpoint::render_endpoint_detail(frame, chunks[1], state, path.as_deref(), &theme)
        }
        Screen::Execute { .. } => execute::render_execute(frame, chunks[1], state, &theme),
    }

    components::render_footer(frame, chunks[2], state, &theme);
}
