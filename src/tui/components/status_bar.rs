use crate::app::{AppState, ConsoleTab, NoticeLevel};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(notice) = state.events.latest() {
        let (tag, tag_style) = match notice.level {
            NoticeLevel::Error => (
                " ERROR ",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ),
            NoticeLevel::Warn => (
                " WARN ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            NoticeLevel::Info => (
                " INFO ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        };
        let spans = vec![
            Span::styled(tag, tag_style),
            Span::raw(" "),
            Span::styled(notice.message.clone(), Style::default().fg(Color::White)),
        ];
        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black)),
            area,
        );
        return;
    }

    let hints = match state.tab {
        ConsoleTab::Spaces => " q quit · tab switch · j/k move · / filter · r refresh · n new · c configs · d delete · ? help",
        ConsoleTab::Sessions => " q quit · tab switch · j/k move · / filter · h/l scope · r refresh · n new · c configs · a connect · d delete · ? help",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(Color::DarkGray),
        ))),
        area,
    );
}
