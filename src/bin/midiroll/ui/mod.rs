//! TUI module for midiroll
//!
//! Header with document facts, instrument list on the left, piano roll of the
//! selected instrument on the right.

mod header;
mod instruments;
mod roll;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use super::app::App;

use header::render_header;
use instruments::render_instruments;
use roll::render_roll;

/// Render the whole viewer
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Instruments + roll
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    render_header(frame, rows[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(20)])
        .split(rows[1]);

    render_instruments(frame, body[0], app);
    render_roll(frame, body[1], app);

    let help = Paragraph::new(
        " [Q] Quit  [↑/↓] Instrument  [←/→] Scroll  [+/-] Zoom  [PgUp/PgDn] Pitch",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, rows[2]);
}
