use crate::app::AppState;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;

pub fn render(frame: &mut Frame, _state: &AppState) {
    let area = centered_rect(55, 70, frame.area());
    frame.render_widget(Clear, area);

    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let entry = |key: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {key:<12}"), key_style),
            Span::raw(what),
        ])
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Navigation",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        entry("Tab", "switch between spaces and sessions"),
        entry("j/k, ↑/↓", "move selection"),
        entry("Enter", "open detail view"),
        entry("/", "filter rows by id"),
        entry("h/l, ←/→", "change session scope"),
        entry("r", "refresh from the backend"),
        Line::from(""),
        Line::from(Span::styled(
            "  Actions",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        entry("n", "create (JSON configs, Ctrl+S to submit)"),
        entry("c", "view and edit configs"),
        entry("a", "connect session to a space"),
        entry("d", "delete with confirmation"),
        Line::from(""),
        entry("q", "quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Esc or ? to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));
    frame.render_widget(Paragraph::new(content).block(block), area);
}
