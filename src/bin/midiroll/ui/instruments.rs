//! Instrument list widget

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use midiroll::model::Family;

use super::App;

pub fn render_instruments(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" Instruments ").borders(Borders::ALL);

    let lines: Vec<Line> = app
        .document
        .instruments
        .iter()
        .enumerate()
        .map(|(index, instrument)| {
            let label = if !instrument.name.is_empty() {
                instrument.name.clone()
            } else if instrument.is_drum {
                "Drums".to_string()
            } else {
                Family::of_program(instrument.program)
                    .map(|family| family.name().to_string())
                    .unwrap_or_default()
            };
            let style = if index == app.selected {
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(
                format!("{:>3} {:.20} ({})", instrument.program, label, instrument.notes.len()),
                style,
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
