use crate::app::{AppState, ConsoleTab};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(format!(" {} ", state.tab.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match state.tab {
        ConsoleTab::Spaces => render_spaces(frame, inner, state),
        ConsoleTab::Sessions => render_sessions(frame, inner, state),
    }
}

fn render_spaces(frame: &mut Frame, area: Rect, state: &AppState) {
    let visible = state.visible_spaces();
    if visible.is_empty() {
        render_empty(frame, area, state, state.spaces.loading, "no spaces");
        return;
    }

    let mut selected = None;
    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(idx, space)| {
            if state.selected_space_id.as_deref() == Some(space.id.as_str()) {
                selected = Some(idx);
            }
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:<38}", space.id),
                    Style::default().fg(Color::White),
                ),
                Span::styled(space.created_string(), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );
    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_sessions(frame: &mut Frame, area: Rect, state: &AppState) {
    let visible = state.visible_sessions();
    if visible.is_empty() {
        render_empty(frame, area, state, state.sessions.loading, "no sessions");
        return;
    }

    let mut selected = None;
    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(idx, session)| {
            if state.selected_session_id.as_deref() == Some(session.id.as_str()) {
                selected = Some(idx);
            }
            let space_style = if session.is_connected() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:<38}", session.id),
                    Style::default().fg(Color::White),
                ),
                Span::styled(format!("{:<38}", session.space_label()), space_style),
                Span::styled(session.created_string(), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );
    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_empty(frame: &mut Frame, area: Rect, state: &AppState, loading: bool, label: &str) {
    let line = if loading {
        Line::from(vec![
            Span::raw(" "),
            Span::styled(state.spinner_char(), Style::default().fg(Color::Cyan)),
            Span::styled(" loading…", Style::default().fg(Color::Gray)),
        ])
    } else if state.filter_text().is_empty() {
        Line::from(Span::styled(
            format!(" {label}"),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            format!(" {label} match the filter"),
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}
