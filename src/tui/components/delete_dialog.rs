use crate::app::{AppState, ConsoleTab};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;

pub fn render(frame: &mut Frame, state: &AppState) {
    let tab = state.tab;
    let wf = state.delete_wf(tab);
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);

    let kind = match tab {
        ConsoleTab::Spaces => "space",
        ConsoleTab::Sessions => "session",
    };
    let target = wf.target.as_deref().unwrap_or("?");

    let body = if wf.busy {
        vec![
            Line::from(""),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(state.spinner_char(), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!(" deleting {kind} {target}…"),
                    Style::default().fg(Color::Gray),
                ),
            ]),
        ]
    } else {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  Delete {kind} {target}?"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  y/Enter confirm · n/Esc cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    };

    let block = Block::default()
        .title(" Confirm Delete ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));
    frame.render_widget(Paragraph::new(body).block(block), area);
}
