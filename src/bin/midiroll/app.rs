//! Viewer state and key handling

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use midiroll::{Advisories, MidiDocument, PianoRoll};
use ratatui::DefaultTerminal;

use super::ui;

/// Ticks per column when the viewer opens, as a fraction of a beat
const DEFAULT_COLUMNS_PER_BEAT: u32 = 4;
/// Pitch shown on the top row when the viewer opens (C6)
const DEFAULT_TOP_PITCH: u8 = 84;
const PITCH_PAGE: u8 = 12;

pub struct App {
    pub document: MidiDocument,
    pub advisories: Advisories,
    /// Index of the instrument shown in the roll
    pub selected: usize,
    /// Piano roll of the selected instrument
    pub roll: PianoRoll,
    /// First tick shown
    pub offset: usize,
    /// Ticks covered by one column
    pub zoom: usize,
    /// Pitch of the top row
    pub top_pitch: u8,
    should_quit: bool,
}

impl App {
    pub fn new(document: MidiDocument, advisories: Advisories) -> Self {
        let zoom = (document.resolution() / DEFAULT_COLUMNS_PER_BEAT).max(1) as usize;
        let roll = roll_of(&document, 0);
        Self {
            document,
            advisories,
            selected: 0,
            roll,
            offset: 0,
            zoom,
            top_pitch: DEFAULT_TOP_PITCH,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit() {
            terminal.draw(|frame| ui::render(frame, self))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => self.select(self.selected.saturating_sub(1)),
            KeyCode::Down => self.select(self.selected + 1),
            KeyCode::Left => self.offset = self.offset.saturating_sub(self.zoom * 8),
            KeyCode::Right => {
                let end = self.document.end_tick() as usize;
                self.offset = (self.offset + self.zoom * 8).min(end);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.zoom = (self.zoom / 2).max(1),
            KeyCode::Char('-') => self.zoom = self.zoom.saturating_mul(2),
            KeyCode::PageUp => {
                self.top_pitch = self.top_pitch.saturating_add(PITCH_PAGE).min(127);
            }
            KeyCode::PageDown => self.top_pitch = self.top_pitch.saturating_sub(PITCH_PAGE),
            _ => {}
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn select(&mut self, index: usize) {
        if index >= self.document.instruments.len() || index == self.selected {
            return;
        }
        self.selected = index;
        self.roll = roll_of(&self.document, index);
    }
}

fn roll_of(document: &MidiDocument, index: usize) -> PianoRoll {
    document
        .instruments
        .get(index)
        .map(|instrument| instrument.piano_roll(None))
        .unwrap_or_else(|| PianoRoll::new(0))
}
