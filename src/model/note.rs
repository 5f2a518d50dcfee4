use crate::error::{check_u7, ValueError};

/// A sounding note, in ticks of the owning document's resolution
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    /// MIDI velocity (0-127)
    pub velocity: u8,
    /// MIDI note number (0-127)
    pub pitch: u8,
    /// Note-on tick
    pub start: u32,
    /// Note-off tick, exclusive
    pub end: u32,
}

impl Note {
    /// Create a note, validating the 7-bit fields.
    ///
    /// `start < end` is not enforced here; see [`Note::is_valid`] and
    /// `Instrument::remove_invalid_notes`.
    pub fn new(velocity: u8, pitch: u8, start: u32, end: u32) -> Result<Self, ValueError> {
        Ok(Self {
            velocity: check_u7("velocity", velocity)?,
            pitch: check_u7("pitch", pitch)?,
            start,
            end,
        })
    }

    /// Length in ticks (0 for inverted notes)
    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the note has a positive length
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }
}
