/*
Piano Roll
==========

A piano roll is a dense [frames x 128] matrix: one row per tick, one column
per MIDI pitch. A cell holds the summed velocity of every note sounding at
that tick and pitch.

Encoding is additive: two overlapping notes on the same pitch add their
velocities, so the matrix does not know about voices.

Decoding walks each pitch column on its own and turns every run of non-zero
cells into one note:

    column for pitch 60:  [0, 0, 5, 5, 5, 0, 0]
                                 ^        ^
                               start     end       -> Note(60, vel 5, 2..5)

Only zero <-> non-zero transitions split notes. A velocity change inside a
run is part of the same note.
*/

use crate::error::ValueError;
use crate::model::Note;

/// Number of MIDI pitches, the width of every piano roll
pub const PITCHES: usize = 128;

/// Dense time x pitch matrix, stored row-major (one row per frame)
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PianoRoll {
    cells: Vec<u32>,
    frames: usize,
}

impl PianoRoll {
    /// Create a silent roll
    pub fn new(frames: usize) -> Self {
        Self {
            cells: vec![0; frames * PITCHES],
            frames,
        }
    }

    /// Wrap an existing row-major buffer of `frames * 128` cells
    pub fn from_vec(frames: usize, cells: Vec<u32>) -> Result<Self, ValueError> {
        if cells.len() != frames * PITCHES {
            return Err(ValueError::RollShape {
                len: cells.len(),
                frames,
            });
        }
        Ok(Self { cells, frames })
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    pub fn get(&self, frame: usize, pitch: u8) -> u32 {
        self.cells[frame * PITCHES + pitch as usize]
    }

    pub fn set(&mut self, frame: usize, pitch: u8, value: u32) {
        self.cells[frame * PITCHES + pitch as usize] = value;
    }

    /// All 128 cells of one frame
    pub fn row(&self, frame: usize) -> &[u32] {
        &self.cells[frame * PITCHES..(frame + 1) * PITCHES]
    }

    /// Values of one pitch over time
    pub fn column(&self, pitch: u8) -> impl Iterator<Item = u32> + '_ {
        self.cells.iter().skip(pitch as usize).step_by(PITCHES).copied()
    }

    /// Whether any cell of `pitch` in frames `[start, end)` is non-zero
    pub fn any_in(&self, pitch: u8, start: usize, end: usize) -> bool {
        let end = end.min(self.frames);
        (start..end).any(|frame| self.get(frame, pitch) != 0)
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.cells
    }
}

/// Render notes into a roll.
///
/// The roll is `bound` frames long, or as long as the latest note end when
/// `bound` is `None`. Notes starting at or after the bound are skipped and
/// notes running past it are cut off.
pub fn encode(notes: &[Note], bound: Option<u32>) -> PianoRoll {
    let frames = bound.unwrap_or_else(|| notes.iter().map(|n| n.end).max().unwrap_or(0)) as usize;
    let mut roll = PianoRoll::new(frames);

    for note in notes {
        let start = note.start as usize;
        if start >= frames {
            continue;
        }
        let end = (note.end as usize).min(frames);
        for frame in start..end {
            let cell = &mut roll.cells[frame * PITCHES + note.pitch as usize];
            *cell = cell.saturating_add(note.velocity as u32);
        }
    }

    roll
}

/// Turn every non-zero run of each pitch column into a note.
///
/// Velocity is the cell value at the start of the run, clamped to 127.
/// Notes come out ordered by pitch, then start.
pub fn decode(roll: &PianoRoll) -> Vec<Note> {
    let mut notes = Vec::new();

    for pitch in 0..PITCHES as u8 {
        let mut open: Option<(usize, u32)> = None;
        for (frame, value) in roll.column(pitch).enumerate() {
            match (open, value) {
                (None, v) if v != 0 => open = Some((frame, v)),
                (Some((start, velocity)), 0) => {
                    notes.push(run_to_note(pitch, start, frame, velocity));
                    open = None;
                }
                _ => {}
            }
        }
        // Run that lasts to the end of the roll
        if let Some((start, velocity)) = open {
            notes.push(run_to_note(pitch, start, roll.frames, velocity));
        }
    }

    notes
}

fn run_to_note(pitch: u8, start: usize, end: usize, velocity: u32) -> Note {
    Note {
        velocity: velocity.min(127) as u8,
        pitch,
        start: start as u32,
        end: end as u32,
    }
}
