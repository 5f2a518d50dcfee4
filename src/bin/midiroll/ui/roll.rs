//! Piano roll widget - one row per pitch, one column per time bin

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::App;

const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
const LABEL_WIDTH: u16 = 5;

fn pitch_label(pitch: u8) -> String {
    let octave = pitch as i32 / 12 - 1;
    format!("{:<4} ", format!("{}{}", NOTE_NAMES[pitch as usize % 12], octave))
}

pub fn render_roll(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        " Roll  tick {}  {} ticks/col ",
        app.offset, app.zoom
    );
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 1 || inner.width <= LABEL_WIDTH {
        return;
    }

    let columns = (inner.width - LABEL_WIDTH) as usize;
    let beat = app.document.resolution() as usize;

    let lines: Vec<Line> = (0..inner.height.min(128) as usize)
        .map_while(|row| app.top_pitch.checked_sub(row as u8))
        .map(|pitch| {
            let mut cells = String::with_capacity(columns);
            for col in 0..columns {
                let start = app.offset + col * app.zoom;
                if app.roll.any_in(pitch, start, start + app.zoom) {
                    cells.push('▓');
                } else if beat > 0 && start % beat < app.zoom {
                    cells.push('┊');
                } else {
                    cells.push('░');
                }
            }
            let label_color = if pitch % 12 == 0 { Color::White } else { Color::DarkGray };
            Line::from(vec![
                Span::styled(pitch_label(pitch), Style::default().fg(label_color)),
                Span::styled(cells, Style::default().fg(Color::Cyan)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
