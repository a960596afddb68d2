use crate::app::{AppState, ConsoleTab};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{centered_rect, render_json_editor};

pub fn render(frame: &mut Frame, state: &AppState) {
    let tab = state.tab;
    let wf = state.create_wf(tab);
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let title = match tab {
        ConsoleTab::Spaces => " New Space ",
        ConsoleTab::Sessions => " New Session ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let constraints = match tab {
        ConsoleTab::Spaces => vec![Constraint::Min(1), Constraint::Length(1)],
        ConsoleTab::Sessions => vec![
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ],
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let editor_area = if tab == ConsoleTab::Sessions {
        let label = if wf.space_choice == 0 {
            "not connected".to_string()
        } else {
            state
                .spaces
                .items
                .get(wf.space_choice - 1)
                .map(|s| s.id.clone())
                .unwrap_or_else(|| "not connected".to_string())
        };
        let picker = Line::from(vec![
            Span::styled(" space: ", Style::default().fg(Color::Gray)),
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (Tab to cycle)", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(picker), chunks[0]);
        chunks[1]
    } else {
        chunks[0]
    };

    render_json_editor(frame, editor_area, &wf.buffer, !wf.busy);

    let footer_area = *chunks.last().unwrap_or(&inner);
    let footer = if wf.busy {
        Line::from(vec![
            Span::raw(" "),
            Span::styled(state.spinner_char(), Style::default().fg(Color::Cyan)),
            Span::styled(" creating…", Style::default().fg(Color::Gray)),
        ])
    } else {
        Line::from(Span::styled(
            " Ctrl+S create · Esc cancel",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(footer), footer_area);
}
