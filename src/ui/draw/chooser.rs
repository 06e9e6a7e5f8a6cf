use super::components::input_line;
use super::styling::Theme;
use crate::state::{AppState, ChooserField, InputMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the specification chooser: last error, URL and theme inputs
pub fn render_chooser(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let editing = state.ui.input_mode == InputMode::Choosing;

    let block = Block::default()
        .title(" Choose a specification ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(if editing { theme.focused_border } else { theme.border })
                .add_modifier(Modifier::BOLD),
        );

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Error
            Constraint::Length(1), // URL label
            Constraint::Length(1), // URL input
            Constraint::Length(1),
            Constraint::Length(1), // Theme label
            Constraint::Length(1), // Theme input
            Constraint::Length(1),
            Constraint::Min(0), // Hint
        ])
        .split(inner);

    if let Some(error) = &state.shell.view().error {
        let error = Paragraph::new(format!("Failed to load: {error}"))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(error, chunks[0]);
    }

    let fields = [
        (ChooserField::Url, "Specification URL:", &state.ui.chooser_url, chunks[1], chunks[2]),
        (ChooserField::Theme, "Theme (optional):", &state.ui.chooser_theme, chunks[4], chunks[5]),
    ];
    for (field, label, editor, label_area, input_area) in fields {
        let focused = editing && state.ui.chooser_field == field;
        let label_style = if focused {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        frame.render_widget(Paragraph::new(label).style(label_style), label_area);
        frame.render_widget(Paragraph::new(input_line(editor, focused, theme)), input_area);
    }

    let mut hint = Vec::new();
    if let Some(message) = &state.ui.chooser_hint {
        hint.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        )));
        hint.push(Line::from(""));
    }
    hint.push(Line::from(Span::styled(
        "e.g. https://petstore.swagger.io/v2/swagger.yaml",
        Style::default().fg(theme.muted),
    )));
    frame.render_widget(Paragraph::new(hint).wrap(Wrap { trim: false }), chunks[7]);
}
