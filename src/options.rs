use crate::rescale::ShortNotePolicy;
use crate::resolve::DanglingNotes;

/// Settings for turning an event stream into a document
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Rescale notes to this many ticks per beat after loading
    pub resolution: Option<u32>,
    /// Treatment of notes that collapse to zero length while rescaling
    pub short_notes: ShortNotePolicy,
    /// Treatment of notes still open when their track ends
    pub dangling_notes: DanglingNotes,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rescale notes to `resolution` ticks per beat once loaded
    pub fn resolution(mut self, resolution: u32) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Set what happens to notes that round to zero length when rescaling
    pub fn short_notes(mut self, policy: ShortNotePolicy) -> Self {
        self.short_notes = policy;
        self
    }

    /// Close notes left open at the end of their track instead of dropping them
    pub fn close_dangling_notes(mut self, close: bool) -> Self {
        self.dangling_notes = if close {
            DanglingNotes::CloseAtTrackEnd
        } else {
            DanglingNotes::Drop
        };
        self
    }
}
