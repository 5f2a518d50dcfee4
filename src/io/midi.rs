/// Track layout convention declared in a MIDI file header
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Type 0: everything on one track
    SingleTrack,
    /// Type 1: simultaneous tracks sharing one timeline
    MultiTrack,
    /// Type 2: independent sequences
    MultiSong,
}

/// Payload of a single track event, as handed over by the byte-level codec
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
    ProgramChange { channel: u8, program: u8 },
    TrackName(String),
    /// Microseconds per quarter note
    SetTempo { tempo: u32 },
    TimeSignature { numerator: u8, denominator: u8 },
    /// Key id: 0-11 major roots C..B, 12-23 minor roots C..B
    KeySignature { key: u8 },
    /// Anything the note model does not look at (controllers, sysex, lyrics, ...)
    Other,
}

impl EventKind {
    /// Tempo, key or time signature
    pub fn is_timing_meta(&self) -> bool {
        matches!(
            self,
            EventKind::SetTempo { .. } | EventKind::TimeSignature { .. } | EventKind::KeySignature { .. }
        )
    }

    /// Note on or note off, regardless of velocity
    pub fn is_note(&self) -> bool {
        matches!(self, EventKind::NoteOn { .. } | EventKind::NoteOff { .. })
    }
}

/// Event with a delta time relative to the previous event in its track
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEvent {
    /// Ticks since the previous event of the same track
    pub delta: u32,
    pub kind: EventKind,
}

impl TrackEvent {
    pub fn new(delta: u32, kind: EventKind) -> Self {
        Self { delta, kind }
    }
}

/// A whole file in codec shape: header data plus delta-timed tracks
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMidi {
    pub format: FileFormat,
    /// Ticks per beat
    pub resolution: u32,
    pub tracks: Vec<Vec<TrackEvent>>,
}

impl RawMidi {
    /// Create an empty multi-track file
    pub fn new(resolution: u32) -> Self {
        Self {
            format: FileFormat::MultiTrack,
            resolution,
            tracks: Vec::new(),
        }
    }

    /// Append a track and return its index
    pub fn push_track(&mut self, events: Vec<TrackEvent>) -> usize {
        self.tracks.push(events);
        self.tracks.len() - 1
    }
}
