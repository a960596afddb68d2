pub mod config_dialog;
pub mod connect_dialog;
pub mod create_dialog;
pub mod delete_dialog;
pub mod header;
pub mod help_popup;
pub mod resource_list;
pub mod status_bar;

use crate::app::JsonBuffer;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Centered popup area, sized as a percentage of the full frame.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Draws a JSON buffer and, when the dialog accepts input, places the
/// terminal cursor at the buffer's cursor position.
pub fn render_json_editor(frame: &mut Frame, area: Rect, buffer: &JsonBuffer, show_cursor: bool) {
    let lines: Vec<Line> = buffer
        .text
        .split('\n')
        .map(|line| Line::from(format!(" {line}")))
        .collect();
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().fg(Color::White)),
        area,
    );

    if !show_cursor {
        return;
    }

    let cursor = buffer.cursor.min(buffer.text.len());
    let before = &buffer.text[..cursor];
    let row = before.matches('\n').count();
    let col = before
        .rsplit_once('\n')
        .map(|(_, tail)| tail.chars().count())
        .unwrap_or_else(|| before.chars().count());
    // Leading space pad plus the area offset; clamp inside the editor.
    let x = area.x + 1 + (col as u16).min(area.width.saturating_sub(2));
    let y = area.y + (row as u16).min(area.height.saturating_sub(1));
    frame.set_cursor_position(Position::new(x, y));
}
