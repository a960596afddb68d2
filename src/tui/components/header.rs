use crate::app::{AppState, ConsoleTab, InputMode};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let active = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let inactive = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            ConsoleTab::Spaces.title(),
            if state.tab == ConsoleTab::Spaces {
                active
            } else {
                inactive
            },
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            ConsoleTab::Sessions.title(),
            if state.tab == ConsoleTab::Sessions {
                active
            } else {
                inactive
            },
        ),
    ];

    if state.tab == ConsoleTab::Sessions {
        spans.push(Span::raw("   "));
        spans.push(Span::styled("scope: ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            state.scope_filter.label().to_string(),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::styled(
            "  (h/l to change)",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let loading = match state.tab {
        ConsoleTab::Spaces => state.spaces.loading,
        ConsoleTab::Sessions => state.sessions.loading,
    };
    if loading {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            state.spinner_char(),
            Style::default().fg(Color::Cyan),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_filter_line(frame: &mut Frame, area: Rect, state: &AppState) {
    let editing = state.input_mode == InputMode::FilterEntry;
    let filter = state.filter_text();

    let mut spans = vec![Span::styled(
        " filter: ",
        Style::default().fg(Color::Gray),
    )];
    if filter.is_empty() && !editing {
        spans.push(Span::styled(
            "(press / to filter by id)",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(
            filter.to_string(),
            Style::default().fg(Color::White),
        ));
    }
    if editing {
        spans.push(Span::styled(
            "▏",
            Style::default().fg(Color::Cyan),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
