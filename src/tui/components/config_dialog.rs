use crate::app::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{centered_rect, render_json_editor};

pub fn render(frame: &mut Frame, state: &AppState) {
    let wf = state.config_wf(state.tab);
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let target = wf.target.as_deref().unwrap_or("?");
    let block = Block::default()
        .title(format!(" Configs · {target} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    render_json_editor(frame, chunks[0], &wf.buffer, !wf.busy);

    let footer = if wf.busy {
        Line::from(vec![
            Span::raw(" "),
            Span::styled(state.spinner_char(), Style::default().fg(Color::Cyan)),
            Span::styled(" saving…", Style::default().fg(Color::Gray)),
        ])
    } else {
        Line::from(Span::styled(
            " Ctrl+S save · Esc cancel",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(footer), chunks[1]);
}
