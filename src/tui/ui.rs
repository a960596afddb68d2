use crate::app::{AppState, ConsoleTab, InputMode};
use crate::tui::components::{
    config_dialog, connect_dialog, create_dialog, delete_dialog, header, help_popup,
    resource_list, status_bar,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub fn draw(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs + scope
            Constraint::Length(1), // Filter line
            Constraint::Min(3),    // Resource list
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    header::render(frame, chunks[0], state);
    header::render_filter_line(frame, chunks[1], state);
    resource_list::render(frame, chunks[2], state);
    status_bar::render(frame, chunks[3], state);

    match state.input_mode {
        InputMode::Create => create_dialog::render(frame, state),
        InputMode::EditConfig => config_dialog::render(frame, state),
        InputMode::Connect => {
            if state.tab == ConsoleTab::Sessions {
                connect_dialog::render(frame, state);
            }
        }
        InputMode::ConfirmDelete => delete_dialog::render(frame, state),
        InputMode::Help => help_popup::render(frame, state),
        InputMode::Normal | InputMode::FilterEntry => {}
    }
}
