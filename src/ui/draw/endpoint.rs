//! Endpoint detail: every operation at or below one path

use super::components::render_empty_message;
use super::styling::{get_method_color, Theme, METHOD_COLUMN_WIDTH};
use crate::state::AppState;
use crate::types::ApiEndpoint;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_endpoint_detail(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    path: Option<&str>,
    theme: &Theme,
) {
    let title = format!(" {} ", path.unwrap_or("?"));
    let endpoints = state.detail_endpoints(path);
    if endpoints.is_empty() {
        let message = match path {
            Some(path) => format!("No operations found under {path}"),
            None => "No path given".to_string(),
        };
        render_empty_message(frame, area, &title, &message, theme);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut selected_start = 0;
    for (idx, endpoint) in endpoints.iter().enumerate() {
        let selected = idx == state.ui.selected_operation;
        if selected {
            selected_start = lines.len();
        }
        lines.extend(operation_lines(endpoint, selected, theme));
        lines.push(Line::from(""));
    }

    // Scrolling is relative to the selected operation
    let offset = u16::try_from(selected_start)
        .unwrap_or(u16::MAX)
        .saturating_add(state.ui.scroll);

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.focused_border))
                .title(title),
        );

    frame.render_widget(content, area);
}

fn operation_lines(endpoint: &ApiEndpoint, selected: bool, theme: &Theme) -> Vec<Line<'static>> {
    let method = endpoint.display_method();
    let marker = if selected { "> " } else { "  " };
    let heading_style = if selected {
        Style::default().bg(theme.highlight_bg).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(marker, Style::default().fg(theme.accent)),
        Span::styled(
            format!("{method:<METHOD_COLUMN_WIDTH$}"),
            heading_style.fg(get_method_color(&method)),
        ),
        Span::styled(endpoint.path.clone(), heading_style),
    ])];

    if let Some(summary) = &endpoint.summary {
        lines.push(Line::from(format!("  {summary}")));
    }
    if let Some(operation_id) = &endpoint.operation_id {
        lines.push(Line::from(Span::styled(
            format!("  operationId: {operation_id}"),
            Style::default().fg(theme.muted),
        )));
    }
    if let Some(description) = &endpoint.description {
        for line in description.lines() {
            lines.push(Line::from(Span::styled(
                format!("  {line}"),
                Style::default().fg(theme.muted),
            )));
        }
    }

    if !endpoint.parameters.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Parameters:",
            Style::default().fg(Color::Magenta),
        )));
        for param in &endpoint.parameters {
            let mut spans = vec![
                Span::raw(format!("    {}", param.name)),
                Span::styled(
                    format!(" ({})", param.location),
                    Style::default().fg(theme.muted),
                ),
            ];
            if let Some(type_label) = param.type_label() {
                let format = param
                    .schema
                    .as_ref()
                    .and_then(|s| s.format.as_deref())
                    .map(|f| format!("<{f}>"))
                    .unwrap_or_default();
                spans.push(Span::styled(
                    format!(" {type_label}{format}"),
                    Style::default().fg(Color::Cyan),
                ));
            }
            if param.is_required() {
                spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
            }
            if let Some(description) = &param.description {
                spans.push(Span::styled(
                    format!("  {description}"),
                    Style::default().fg(theme.muted),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    if !endpoint.response_codes.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("  Responses: ", Style::default().fg(Color::Magenta)),
            Span::raw(endpoint.response_codes.join(", ")),
        ]));
    }

    lines
}
