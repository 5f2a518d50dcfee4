use super::{Instrument, KeySignature, TempoChange, TimeSignature};
use crate::advisory::Advisories;
use crate::emit::emit_document;
use crate::error::{LoadError, ValueError};
use crate::io::midi::RawMidi;
use crate::options::LoadOptions;
use crate::rescale::{rescale_instruments, ShortNotePolicy};
use crate::resolve::resolve_instruments;
use crate::roll::PianoRoll;
use crate::timeline::{extract_meta, normalize};

/// Notes grouped by instrument, plus tempo, key and time signature changes
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiDocument {
    /// Ticks per beat; changed only through [`MidiDocument::change_resolution`]
    resolution: u32,
    pub tempo_changes: Vec<TempoChange>,
    pub time_signatures: Vec<TimeSignature>,
    pub key_signatures: Vec<KeySignature>,
    /// Instruments in document order
    pub instruments: Vec<Instrument>,
}

/// A freshly loaded document and the advisories raised while loading it
#[derive(Debug, Clone)]
pub struct Loaded {
    pub document: MidiDocument,
    pub advisories: Advisories,
}

impl MidiDocument {
    /// Create an empty document
    pub fn new(resolution: u32) -> Result<Self, ValueError> {
        if resolution == 0 {
            return Err(ValueError::NotPositive { field: "resolution" });
        }
        Ok(Self {
            resolution,
            tempo_changes: Vec::new(),
            time_signatures: Vec::new(),
            key_signatures: Vec::new(),
            instruments: Vec::new(),
        })
    }

    /// Build a document from a delta-timed event stream.
    ///
    /// Fails on a non multi-track layout, fewer than two tracks, or an
    /// implausibly large tick. Everything else is recovered from and reported
    /// through the returned advisories.
    pub fn from_raw(raw: &RawMidi, options: &LoadOptions) -> Result<Loaded, LoadError> {
        let timeline = normalize(raw)?;
        let mut document = MidiDocument::new(timeline.resolution)?;
        let mut advisories = Advisories::new();

        let meta = extract_meta(&timeline, &mut advisories);
        document.tempo_changes = meta.tempo_changes;
        document.time_signatures = meta.time_signatures;
        document.key_signatures = meta.key_signatures;
        document.instruments = resolve_instruments(&timeline, options.dangling_notes, &mut advisories);

        if let Some(target) = options.resolution {
            document.change_resolution(target, options.short_notes)?;
        }

        Ok(Loaded {
            document,
            advisories,
        })
    }

    /// Lay the document out as a multi-track event stream (see [`emit_document`])
    pub fn to_raw(&self) -> (RawMidi, Advisories) {
        let mut advisories = Advisories::new();
        let raw = emit_document(self, &mut advisories);
        (raw, advisories)
    }

    /// Single-instrument document made from a piano roll, with one tempo change at tick 0
    pub fn from_piano_roll(
        roll: &PianoRoll,
        resolution: u32,
        program: u8,
        is_drum: bool,
        bpm: f64,
    ) -> Result<Self, ValueError> {
        let mut document = Self::new(resolution)?;
        document.tempo_changes.push(TempoChange::from_bpm(bpm, 0)?);
        document.add_instrument(Instrument::from_piano_roll(roll, program, is_drum, "")?);
        Ok(document)
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn add_instrument(&mut self, instrument: Instrument) {
        self.instruments.push(instrument);
    }

    /// Last note-off tick over all instruments
    pub fn end_tick(&self) -> u32 {
        self.instruments.iter().map(Instrument::end_tick).max().unwrap_or(0)
    }

    /// Rescale every note to `target` ticks per beat.
    ///
    /// All notes and the resolution change together, or nothing changes. Meta
    /// event ticks keep their old values.
    pub fn change_resolution(&mut self, target: u32, policy: ShortNotePolicy) -> Result<(), ValueError> {
        rescale_instruments(&mut self.instruments, self.resolution, target, policy)?;
        self.resolution = target;
        Ok(())
    }

    /// Tempo in effect at the start of the piece, if any was set
    pub fn initial_tempo(&self) -> Option<&TempoChange> {
        self.tempo_changes.first()
    }

    /// Drop invalid notes from every instrument
    pub fn remove_invalid_notes(&mut self) {
        for instrument in &mut self.instruments {
            instrument.remove_invalid_notes();
        }
    }
}

impl Loaded {
    /// Discard the advisories
    pub fn into_document(self) -> MidiDocument {
        self.document
    }
}
