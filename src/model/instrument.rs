use super::note::Note;
use crate::error::{check_u7, ValueError};
use crate::roll::{self, PianoRoll};

/// Notes played with one program on one channel of one track
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    /// General MIDI program (0-127)
    pub program: u8,
    /// Percussion instrument (channel 9)
    pub is_drum: bool,
    /// Display name, usually the track name
    pub name: String,
    /// Notes in no particular order
    pub notes: Vec<Note>,
}

impl Instrument {
    /// Create an instrument without notes
    pub fn new(program: u8, is_drum: bool, name: impl Into<String>) -> Result<Self, ValueError> {
        Ok(Self {
            program: check_u7("program", program)?,
            is_drum,
            name: name.into(),
            notes: Vec::new(),
        })
    }

    pub fn add_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Last note-off tick, 0 without notes
    pub fn end_tick(&self) -> u32 {
        self.notes.iter().map(|n| n.end).max().unwrap_or(0)
    }

    /// Drop notes whose end is not after their start
    pub fn remove_invalid_notes(&mut self) {
        self.notes.retain(Note::is_valid);
    }

    /// Piano roll of this instrument's notes, `bound` frames long (defaults to [`Instrument::end_tick`])
    pub fn piano_roll(&self, bound: Option<u32>) -> PianoRoll {
        roll::encode(&self.notes, bound)
    }

    /// Build an instrument whose notes are the runs found in `roll`
    pub fn from_piano_roll(
        roll: &PianoRoll,
        program: u8,
        is_drum: bool,
        name: impl Into<String>,
    ) -> Result<Self, ValueError> {
        let mut instrument = Self::new(program, is_drum, name)?;
        instrument.notes = roll::decode(roll);
        Ok(instrument)
    }

    /// Concatenate the notes of two instruments of the same kind.
    ///
    /// The result takes program and name from `self`.
    pub fn merge(&self, other: &Instrument) -> Result<Instrument, ValueError> {
        if self.is_drum != other.is_drum {
            return Err(ValueError::DrumMismatch);
        }
        let mut notes = Vec::with_capacity(self.notes.len() + other.notes.len());
        notes.extend_from_slice(&self.notes);
        notes.extend_from_slice(&other.notes);
        Ok(Instrument {
            program: self.program,
            is_drum: self.is_drum,
            name: self.name.clone(),
            notes,
        })
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Instrument(program={}, is_drum={}, name={:?})",
            self.program, self.is_drum, self.name
        )
    }
}
