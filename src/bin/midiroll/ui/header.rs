//! Header widget - resolution, tempo, meter, key and advisory count

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use midiroll::model::DEFAULT_TEMPO;

use super::App;

pub fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" midiroll ").borders(Borders::ALL);
    let doc = &app.document;

    let bpm = doc
        .initial_tempo()
        .map(|tc| tc.bpm())
        .unwrap_or(60_000_000.0 / DEFAULT_TEMPO as f64);
    let meter = doc
        .time_signatures
        .first()
        .map(|ts| format!("{}/{}", ts.numerator, ts.denominator))
        .unwrap_or_else(|| "4/4".to_string());
    let key = doc
        .key_signatures
        .first()
        .map(|ks| ks.name())
        .unwrap_or_else(|| "-".to_string());

    let advisory_color = if app.advisories.is_empty() {
        Color::DarkGray
    } else {
        Color::Yellow
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" Resolution: {}  ", doc.resolution()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("BPM: {:.1}  ", bpm), Style::default().fg(Color::Cyan)),
        Span::raw(format!("Time: {}  Key: {}  ", meter, key)),
        Span::raw(format!("Ticks: {}  ", doc.end_tick())),
        Span::styled(
            format!("Advisories: {}", app.advisories.len()),
            Style::default().fg(advisory_color),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
