//! "Try it out" view: the parameter form, the request body and the response

use super::components::{input_line, render_empty_message};
use super::styling::{get_method_color, get_status_color, Theme};
use crate::editor::TextEditor;
use crate::request::build_url_with_params;
use crate::state::{AppState, InputMode};
use crate::types::{ApiEndpoint, RequestConfig};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Height of the body editor, borders included
const BODY_HEIGHT: u16 = 8;

pub fn render_execute(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(endpoint) = &state.request.endpoint else {
        render_empty_message(
            frame,
            area,
            " Execute ",
            "Operation not found in this specification",
            theme,
        );
        return;
    };

    let form_height = u16::try_from(state.request.config.parameters.len().max(1))
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let body_height = if endpoint.supports_body() { BODY_HEIGHT } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Request line
            Constraint::Length(form_height), // Parameters
            Constraint::Length(body_height), // Body
            Constraint::Min(0),              // Response
        ])
        .split(area);

    render_request_line(frame, chunks[0], endpoint, state, theme);
    render_parameters(frame, chunks[1], state, theme);
    if endpoint.supports_body() {
        render_body(frame, chunks[2], state, theme);
    }
    render_response(frame, chunks[3], state, theme);
}

fn render_request_line(
    frame: &mut Frame,
    area: Rect,
    endpoint: &ApiEndpoint,
    state: &AppState,
    theme: &Theme,
) {
    let method = endpoint.display_method();
    let target = preview_url(state.api_base_url().as_deref(), endpoint, &state.request.config);

    let line = Line::from(vec![
        Span::styled(
            format!("{method} "),
            Style::default()
                .fg(get_method_color(&method))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(target),
    ]);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    if let Some(summary) = &endpoint.summary {
        block = block.title(format!(" {summary} "));
    }

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// URL the request would go to with the current form values
fn preview_url(base_url: Option<&str>, endpoint: &ApiEndpoint, config: &RequestConfig) -> String {
    let Some(base_url) = base_url else {
        return endpoint.path.clone();
    };

    build_url_with_params(
        base_url,
        &endpoint.path,
        &config.path_params_map(),
        &config.query_params_map(),
    )
    .unwrap_or_else(|_| format!("{base_url}{}", endpoint.path))
}

fn render_parameters(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let params = &state.request.config.parameters;
    let editing = state.ui.input_mode == InputMode::EditingParam;

    let mut lines: Vec<Line> = Vec::new();
    if params.is_empty() {
        lines.push(Line::from(Span::styled(
            "No parameters defined for this operation",
            Style::default().fg(theme.muted),
        )));
    }

    for (idx, param) in params.iter().enumerate() {
        let selected = idx == state.ui.selected_row;
        let marker = if selected { "> " } else { "  " };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(theme.accent)),
            Span::styled(
                format!("{:<8}", param.param_type.label()),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled(
                param.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        if param.required {
            spans.push(Span::styled("*", Style::default().fg(Color::Red)));
        }
        spans.push(Span::raw(" = "));

        if selected && editing {
            spans.extend(input_line(&state.ui.param_buffer, true, theme).spans);
        } else if param.value.is_empty() {
            spans.push(Span::styled("<empty>", Style::default().fg(theme.muted)));
        } else {
            spans.push(Span::styled(
                param.value.clone(),
                Style::default().fg(Color::Yellow),
            ));
        }

        let line = Line::from(spans);
        lines.push(if selected {
            line.style(Style::default().bg(theme.highlight_bg))
        } else {
            line
        });
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.focused_border))
            .title(" Parameters "),
    );
    frame.render_widget(form, area);
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let body_row = state.request.config.parameters.len();
    let selected = state.ui.selected_row == body_row;
    let editing = state.ui.input_mode == InputMode::EditingBody;

    let lines = if editing {
        body_lines(&state.ui.body, theme)
    } else if state.request.config.body.is_empty() {
        vec![Line::from(Span::styled(
            "Press [Enter] to edit the JSON body",
            Style::default().fg(theme.muted),
        ))]
    } else {
        state
            .request
            .config
            .body
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect()
    };

    let border = if editing || selected {
        theme.focused_border
    } else {
        theme.border
    };
    let title = if selected && !editing { "> Body (JSON) " } else { " Body (JSON) " };

    let body = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title),
    );
    frame.render_widget(body, area);
}

/// Body editor content split into lines, with the cursor drawn on its line
fn body_lines(editor: &TextEditor, theme: &Theme) -> Vec<Line<'static>> {
    let content = editor.content();
    let cursor = editor.cursor().min(content.len());
    let cursor_line = content[..cursor].matches('\n').count();

    let mut lines = Vec::new();
    let mut offset = 0;
    for (idx, raw) in content.split('\n').enumerate() {
        if idx == cursor_line {
            let mut line_editor = TextEditor::with_content(raw);
            line_editor.move_cursor_to_start();
            for _ in raw[..cursor - offset].chars() {
                line_editor.move_cursor_right();
            }
            lines.push(input_line(&line_editor, true, theme));
        } else {
            lines.push(Line::from(Span::styled(
                raw.to_string(),
                Style::default().fg(Color::Yellow),
            )));
        }
        offset += raw.len() + 1;
    }

    lines
}

fn render_response(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let mut lines: Vec<Line> = Vec::new();

    if state.request.executing {
        lines.push(Line::from(Span::styled(
            "Executing request...",
            Style::default().fg(theme.accent),
        )));
    } else if let Some(response) = &state.request.response {
        if response.is_error {
            lines.push(Line::from(Span::styled(
                "Error",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            if let Some(message) = &response.error_message {
                for line in message.lines() {
                    lines.push(Line::from(Span::styled(
                        line.to_string(),
                        Style::default().fg(Color::Red),
                    )));
                }
            }
        } else {
            lines.push(Line::from(vec![
                Span::styled("Status: ", Style::default().fg(theme.accent)),
                Span::styled(
                    format!("{} {}", response.status, response.status_text),
                    Style::default().fg(get_status_color(response.status)),
                ),
                Span::raw("  "),
                Span::styled("Duration: ", Style::default().fg(theme.accent)),
                Span::raw(format!("{}ms", response.duration.as_millis())),
            ]));
            lines.push(Line::from(""));

            let mut headers: Vec<(&String, &String)> = response.headers.iter().collect();
            headers.sort();
            for (name, value) in headers {
                lines.push(Line::from(vec![
                    Span::styled(format!("{name}: "), Style::default().fg(theme.muted)),
                    Span::raw(value.clone()),
                ]));
            }
            lines.push(Line::from(""));

            for line in try_format_json(&response.body).lines() {
                lines.push(Line::from(line.to_string()));
            }
        }
    } else {
        lines.push(Line::from(Span::styled(
            "Press [x] to execute request",
            Style::default().fg(theme.muted),
        )));
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.ui.scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(" Response "),
        );

    frame.render_widget(content, area);
}

/// Pretty-print a JSON body, or return it unchanged
pub fn try_format_json(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    }
}
