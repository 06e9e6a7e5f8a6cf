//! Endpoint list: one row per path group, with an optional search filter

use super::components::{input_line, render_empty_message};
use super::styling::{get_method_color, parse_background, Theme};
use crate::state::{AppState, InputMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render_endpoint_list(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(data) = &state.shell.view().data else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title, version, description
            Constraint::Length(3), // Search bar
            Constraint::Min(0),    // Groups
        ])
        .split(area);

    let mut title = vec![Span::styled(
        data.title().to_string(),
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    )];
    if let Some(version) = data.info.version() {
        title.push(Span::styled(format!("  v{version}"), Style::default().fg(theme.muted)));
    }
    let mut heading = vec![Line::from(title)];
    if let Some(description) = data.info.description.as_deref().and_then(|d| d.lines().next()) {
        heading.push(Line::from(Span::styled(
            description.to_string(),
            Style::default().fg(theme.muted),
        )));
    }
    frame.render_widget(Paragraph::new(heading), chunks[0]);

    render_search_bar(frame, chunks[1], state, theme);

    let groups = state.filtered_groups();
    if groups.is_empty() {
        let message = if state.ui.search.is_empty() {
            "This specification defines no paths"
        } else {
            "No matching paths\n\nPress [Esc] while searching to clear the filter"
        };
        render_empty_message(frame, chunks[2], " Paths ", message, theme);
        return;
    }

    let items: Vec<ListItem> = groups
        .iter()
        .map(|group| {
            let mut spans = vec![Span::styled(
                format!("{:<24}", group.name),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            for method in group.methods() {
                spans.push(Span::styled(
                    format!("{method} "),
                    Style::default().fg(get_method_color(&method)),
                ));
            }
            let count = group.endpoints.len();
            let noun = if count == 1 { "operation" } else { "operations" };
            spans.push(Span::styled(
                format!(" ({count} {noun})"),
                Style::default().fg(theme.muted),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.focused_border))
        .title(format!(" Paths [{}/{}] ", groups.len(), state.ui.groups.len()));
    if let Some(bg) = state
        .shell
        .props()
        .background
        .as_deref()
        .and_then(parse_background)
    {
        block = block.style(Style::default().bg(bg));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.highlight_bg).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(state.ui.selected_group));
    frame.render_stateful_widget(list, chunks[2], &mut list_state);
}

/// Render the search bar with active filter indication
fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let is_active = state.ui.input_mode == InputMode::Searching;

    let border_style = if is_active {
        Style::default().fg(theme.focused_border)
    } else if !state.ui.search.is_empty() {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.border)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search (/) ");

    let paragraph = Paragraph::new(input_line(&state.ui.search, is_active, theme)).block(block);
    frame.render_widget(paragraph, area);
}
