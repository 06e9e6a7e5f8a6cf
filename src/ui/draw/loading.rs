use super::styling::Theme;
use crate::state::AppState;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Spinner frames, advanced by the main loop
pub const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

pub fn render_loading(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize, theme: &Theme) {
    let url = state.shell.view().url.as_deref().unwrap_or("specification");
    let text = format!(
        "{} Loading {url}\n\nPlease wait...",
        SPINNER[spinner_index % SPINNER.len()]
    );

    let loading = Paragraph::new(text)
        .style(Style::default().fg(theme.accent))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        );

    frame.render_widget(loading, area);
}
