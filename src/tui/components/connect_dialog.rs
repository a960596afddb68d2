use crate::app::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::centered_rect;

pub fn render(frame: &mut Frame, state: &AppState) {
    let wf = &state.connect;
    let area = centered_rect(50, 50, frame.area());
    frame.render_widget(Clear, area);

    let target = wf.target.as_deref().unwrap_or("?");
    let block = Block::default()
        .title(format!(" Connect · {target} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    if state.spaces.items.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " no spaces loaded",
                Style::default().fg(Color::DarkGray),
            ))),
            chunks[0],
        );
    } else {
        let items: Vec<ListItem> = state
            .spaces
            .items
            .iter()
            .map(|space| ListItem::new(format!(" {}", space.id)))
            .collect();
        let list = List::new(items).highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );
        let mut list_state = ListState::default().with_selected(Some(wf.space_choice));
        frame.render_stateful_widget(list, chunks[0], &mut list_state);
    }

    let footer = if wf.busy {
        Line::from(vec![
            Span::raw(" "),
            Span::styled(state.spinner_char(), Style::default().fg(Color::Cyan)),
            Span::styled(" connecting…", Style::default().fg(Color::Gray)),
        ])
    } else {
        Line::from(Span::styled(
            " j/k pick · Enter connect · Esc cancel",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(footer), chunks[1]);
}
