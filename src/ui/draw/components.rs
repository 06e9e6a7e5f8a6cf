//! Reusable UI components
//!
//! This module contains shared UI components used throughout the application:
//! - Header (address bar and document title)
//! - Footer (command help, flash messages)
//! - Text inputs with a visible cursor
//! - Empty state messages

use super::styling::Theme;
use crate::editor::TextEditor;
use crate::router::Screen;
use crate::state::{AppState, InputMode};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the address bar: current href plus the document title
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let view = state.shell.view();
    let href = state.shell.history().href();

    let mut spans = vec![Span::styled(href, Style::default().fg(theme.accent))];
    if let Some(title) = &view.title {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(key) = &view.theme {
        spans.push(Span::styled(
            format!("  [{key}]"),
            Style::default().fg(theme.muted),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" swagger-shell "),
    );

    frame.render_widget(header, area);
}

/// Render the footer with command help, or the flash message if one is set
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let footer = match &state.ui.flash {
        Some(message) => {
            Paragraph::new(message.clone()).style(Style::default().fg(Color::Green))
        }
        None => Paragraph::new(help_text(state)).style(Style::default().fg(Color::Yellow)),
    };

    let footer = footer.block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title("Commands"),
    );

    frame.render_widget(footer, area);
}

fn help_text(state: &AppState) -> String {
    match state.ui.input_mode {
        InputMode::Choosing => "Tab:Field Enter:Load Ctrl+W:Delete word Ctrl+L:Clear Ctrl+C:Quit".into(),
        InputMode::Searching => "Type to filter  Enter:Keep filter  Esc:Clear".into(),
        InputMode::EditingParam => "Enter:Save  Esc:Cancel  Ctrl+L:Clear".into(),
        InputMode::EditingBody => "Esc:Done  Enter:Newline  Ctrl+F:Format JSON".into(),
        InputMode::Normal => {
            let unload = if state.shell.can_unload() { " u:Unload" } else { "" };
            match state.screen() {
                Screen::Endpoints => {
                    format!("j/k:Nav Enter:Open /:Search y:Yank link{unload} q:Quit")
                }
                Screen::Endpoint { .. } => {
                    let execute = if state.shell.props().executable {
                        " Enter:Try it"
                    } else {
                        ""
                    };
                    format!("j/k:Nav{execute} Ctrl+D/U:Scroll Esc:Back y:Yank link q:Quit")
                }
                Screen::Execute { .. } => {
                    "j/k:Nav Enter:Edit x:Execute Ctrl+D/U:Scroll Esc:Back y:Yank link q:Quit"
                        .to_string()
                }
                Screen::Chooser => "Enter:Edit q:Quit".to_string(),
                Screen::Loading | Screen::Blank => "q:Quit".to_string(),
            }
        }
    }
}

/// One line showing an input's content, with a block cursor when focused
pub fn input_line(editor: &TextEditor, focused: bool, theme: &Theme) -> Line<'static> {
    let text_style = Style::default().fg(Color::Yellow);
    if !focused {
        return Line::from(Span::styled(editor.content().to_string(), text_style));
    }

    let content = editor.content();
    let cursor = editor.cursor().min(content.len());
    let (before, rest) = content.split_at(cursor);
    let mut chars = rest.chars();
    let under = chars.next().map(String::from).unwrap_or_else(|| " ".to_string());

    Line::from(vec![
        Span::styled(before.to_string(), text_style),
        Span::styled(under, Style::default().fg(Color::Black).bg(theme.accent)),
        Span::styled(chars.as_str().to_string(), text_style),
    ])
}

/// Render a bordered message for screens with nothing to show
pub fn render_empty_message(frame: &mut Frame, area: Rect, title: &str, message: &str, theme: &Theme) {
    let empty = Paragraph::new(message.to_string())
        .style(Style::default().fg(theme.muted))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(title.to_string()),
        );

    frame.render_widget(empty, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_input_line_cursor_at_end_adds_space() {
        let editor = TextEditor::with_content("abc");
        let line = input_line(&editor, true, &Theme::default());
        assert_eq!(line_text(&line), "abc ");
        assert_eq!(line.spans[1].content, " ");
    }

    #[test]
    fn test_input_line_cursor_in_middle() {
        let mut editor = TextEditor::with_content("abc");
        editor.move_cursor_left();
        let line = input_line(&editor, true, &Theme::default());
        assert_eq!(line.spans[0].content, "ab");
        assert_eq!(line.spans[1].content, "c");
        assert_eq!(line.spans[2].content, "");
    }

    #[test]
    fn test_input_line_unfocused_has_no_cursor() {
        let editor = TextEditor::with_content("abc");
        let line = input_line(&editor, false, &Theme::default());
        assert_eq!(line_text(&line), "abc");
    }
}
