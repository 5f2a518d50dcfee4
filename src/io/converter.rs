//! Standard MIDI File adapter
//!
//! Converts between `midly`'s borrowed event types and the owned, codec-neutral
//! [`RawMidi`] stream, and wires that into [`MidiDocument`] loading and saving.

use std::path::Path;

use midly::num::{u15, u24, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

use crate::advisory::Advisories;
use crate::error::LoadError;
use crate::io::midi::{EventKind, FileFormat, RawMidi, TrackEvent};
use crate::model::{KeySignature, Loaded, MidiDocument};
use crate::options::LoadOptions;

const MAX_RESOLUTION: u32 = 0x7FFF;
const MAX_DELTA: u32 = 0x0FFF_FFFF;
// MIDI clocks per metronome click
const CLOCKS_PER_CLICK: u8 = 24;
// 32nd notes per quarter note
const THIRTY_SECONDS_PER_QUARTER: u8 = 8;

/// Errors reading or writing Standard MIDI Files
#[derive(Debug)]
pub enum SmfError {
    /// Bytes are not a valid MIDI file
    Parse(midly::Error),
    Io(std::io::Error),
    /// The event stream was rejected by the loader
    Load(LoadError),
    /// A value that the file format cannot represent
    Unencodable { what: String },
}

impl std::fmt::Display for SmfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SmfError::Parse(err) => write!(f, "Failed to parse MIDI file: {}", err),
            SmfError::Io(err) => write!(f, "MIDI file I/O failed: {}", err),
            SmfError::Load(err) => write!(f, "{}", err),
            SmfError::Unencodable { what } => write!(f, "Cannot encode {} in a MIDI file", what),
        }
    }
}

impl std::error::Error for SmfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SmfError::Parse(err) => Some(err),
            SmfError::Io(err) => Some(err),
            SmfError::Load(err) => Some(err),
            SmfError::Unencodable { .. } => None,
        }
    }
}

impl From<midly::Error> for SmfError {
    fn from(err: midly::Error) -> Self {
        SmfError::Parse(err)
    }
}

impl From<std::io::Error> for SmfError {
    fn from(err: std::io::Error) -> Self {
        SmfError::Io(err)
    }
}

impl From<LoadError> for SmfError {
    fn from(err: LoadError) -> Self {
        SmfError::Load(err)
    }
}

/// Copy a parsed file into the codec-neutral event stream
pub fn raw_from_smf(smf: &Smf) -> Result<RawMidi, SmfError> {
    let resolution = match smf.header.timing {
        Timing::Metrical(tpb) => tpb.as_int() as u32,
        Timing::Timecode(..) => {
            return Err(LoadError::Format {
                reason: "timecode-based timing is not supported".to_string(),
            }
            .into())
        }
    };
    let format = match smf.header.format {
        Format::SingleTrack => FileFormat::SingleTrack,
        Format::Parallel => FileFormat::MultiTrack,
        Format::Sequential => FileFormat::MultiSong,
    };

    let tracks = smf
        .tracks
        .iter()
        .map(|track| {
            track
                .iter()
                .map(|event| TrackEvent::new(event.delta.as_int(), event_from_smf(&event.kind)))
                .collect()
        })
        .collect();

    Ok(RawMidi {
        format,
        resolution,
        tracks,
    })
}

fn event_from_smf(kind: &TrackEventKind) -> EventKind {
    match kind {
        TrackEventKind::Midi { channel, message } => {
            let channel = channel.as_int();
            match *message {
                MidiMessage::NoteOn { key, vel } => EventKind::NoteOn {
                    channel,
                    note: key.as_int(),
                    velocity: vel.as_int(),
                },
                MidiMessage::NoteOff { key, vel } => EventKind::NoteOff {
                    channel,
                    note: key.as_int(),
                    velocity: vel.as_int(),
                },
                MidiMessage::ProgramChange { program } => EventKind::ProgramChange {
                    channel,
                    program: program.as_int(),
                },
                _ => EventKind::Other,
            }
        }
        TrackEventKind::Meta(meta) => match *meta {
            MetaMessage::TrackName(name) => EventKind::TrackName(String::from_utf8_lossy(name).into_owned()),
            MetaMessage::Tempo(tempo) => EventKind::SetTempo { tempo: tempo.as_int() },
            MetaMessage::TimeSignature(numerator, denominator_pow, ..) => EventKind::TimeSignature {
                numerator,
                // An out-of-range exponent becomes 0 and is rejected downstream
                denominator: 1u8.checked_shl(denominator_pow as u32).unwrap_or(0),
            },
            MetaMessage::KeySignature(accidentals, minor) => {
                match KeySignature::from_accidentals(accidentals, minor, 0) {
                    Ok(ks) => EventKind::KeySignature { key: ks.key },
                    Err(err) => {
                        log::debug!("ignoring key signature: {}", err);
                        EventKind::Other
                    }
                }
            }
            _ => EventKind::Other,
        },
        _ => EventKind::Other,
    }
}

/// Borrow an event stream as a `midly` file ready for writing
pub fn raw_to_smf(raw: &RawMidi) -> Result<Smf<'_>, SmfError> {
    if raw.resolution == 0 || raw.resolution > MAX_RESOLUTION {
        return Err(SmfError::Unencodable {
            what: format!("resolution {}", raw.resolution),
        });
    }
    let format = match raw.format {
        FileFormat::SingleTrack => Format::SingleTrack,
        FileFormat::MultiTrack => Format::Parallel,
        FileFormat::MultiSong => Format::Sequential,
    };
    let mut smf = Smf::new(Header::new(
        format,
        Timing::Metrical(u15::new(raw.resolution as u16)),
    ));

    for events in &raw.tracks {
        let mut track = Vec::with_capacity(events.len() + 1);
        for event in events {
            if event.delta > MAX_DELTA {
                return Err(SmfError::Unencodable {
                    what: format!("delta time {}", event.delta),
                });
            }
            if let Some(kind) = event_to_smf(&event.kind)? {
                track.push(midly::TrackEvent {
                    delta: u28::new(event.delta),
                    kind,
                });
            }
        }
        track.push(midly::TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });
        smf.tracks.push(track);
    }

    Ok(smf)
}

fn event_to_smf(kind: &EventKind) -> Result<Option<TrackEventKind<'_>>, SmfError> {
    let midi = |channel: u8, message| TrackEventKind::Midi {
        channel: u4::new(channel & 0x0F),
        message,
    };
    let kind = match kind {
        EventKind::NoteOn {
            channel,
            note,
            velocity,
        } => midi(
            *channel,
            MidiMessage::NoteOn {
                key: u7::new(note & 0x7F),
                vel: u7::new(velocity & 0x7F),
            },
        ),
        EventKind::NoteOff {
            channel,
            note,
            velocity,
        } => midi(
            *channel,
            MidiMessage::NoteOff {
                key: u7::new(note & 0x7F),
                vel: u7::new(velocity & 0x7F),
            },
        ),
        EventKind::ProgramChange { channel, program } => midi(
            *channel,
            MidiMessage::ProgramChange {
                program: u7::new(program & 0x7F),
            },
        ),
        EventKind::TrackName(name) => TrackEventKind::Meta(MetaMessage::TrackName(name.as_bytes())),
        EventKind::SetTempo { tempo } => {
            if *tempo > 0xFF_FFFF {
                return Err(SmfError::Unencodable {
                    what: format!("tempo {}", tempo),
                });
            }
            TrackEventKind::Meta(MetaMessage::Tempo(u24::new(*tempo)))
        }
        EventKind::TimeSignature {
            numerator,
            denominator,
        } => {
            if !denominator.is_power_of_two() {
                return Err(SmfError::Unencodable {
                    what: format!("time signature denominator {}", denominator),
                });
            }
            TrackEventKind::Meta(MetaMessage::TimeSignature(
                *numerator,
                denominator.trailing_zeros() as u8,
                CLOCKS_PER_CLICK,
                THIRTY_SECONDS_PER_QUARTER,
            ))
        }
        EventKind::KeySignature { key } => {
            let ks = KeySignature::new(*key, 0).map_err(|err| SmfError::Unencodable {
                what: err.to_string(),
            })?;
            TrackEventKind::Meta(MetaMessage::KeySignature(ks.accidentals(), ks.is_minor()))
        }
        EventKind::Other => return Ok(None),
    };
    Ok(Some(kind))
}

impl MidiDocument {
    /// Load a Standard MIDI File from memory
    pub fn from_bytes(bytes: &[u8], options: &LoadOptions) -> Result<Loaded, SmfError> {
        let smf = Smf::parse(bytes)?;
        let raw = raw_from_smf(&smf)?;
        Ok(MidiDocument::from_raw(&raw, options)?)
    }

    /// Load a Standard MIDI File from disk
    pub fn from_file(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Loaded, SmfError> {
        let bytes = std::fs::read(path)?;
        MidiDocument::from_bytes(&bytes, options)
    }

    /// Encode as a type 1 Standard MIDI File
    pub fn to_bytes(&self) -> Result<(Vec<u8>, Advisories), SmfError> {
        let (raw, advisories) = self.to_raw();
        let smf = raw_to_smf(&raw)?;
        let mut bytes = Vec::new();
        smf.write_std(&mut bytes)?;
        Ok((bytes, advisories))
    }

    /// Write as a type 1 Standard MIDI File
    pub fn write(&self, path: impl AsRef<Path>) -> Result<Advisories, SmfError> {
        let (bytes, advisories) = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(advisories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Instrument, Note, TempoChange, TimeSignature};

    fn sample_document() -> MidiDocument {
        let mut doc = MidiDocument::new(480).unwrap();
        doc.tempo_changes.push(TempoChange::new(500_000, 0).unwrap());
        doc.time_signatures.push(TimeSignature::new(6, 8, 0).unwrap());
        doc.key_signatures.push(KeySignature::new(21, 0).unwrap());

        let mut strings = Instrument::new(48, false, "Strings").unwrap();
        strings.add_note(Note::new(70, 55, 0, 960).unwrap());
        strings.add_note(Note::new(72, 59, 480, 1440).unwrap());
        doc.add_instrument(strings);

        let mut drums = Instrument::new(0, true, "Drums").unwrap();
        drums.add_note(Note::new(110, 36, 1440, 1500).unwrap());
        drums.add_note(Note::new(100, 38, 1920, 1980).unwrap());
        doc.add_instrument(drums);
        doc
    }

    #[test]
    fn test_bytes_round_trip() {
        let doc = sample_document();
        let (bytes, advisories) = doc.to_bytes().unwrap();
        assert!(advisories.is_empty());

        let loaded = MidiDocument::from_bytes(&bytes, &LoadOptions::default()).unwrap();
        assert!(loaded.advisories.is_empty());
        assert_eq!(loaded.document, doc);
    }

    #[test]
    fn test_time_signature_denominator_as_power_of_two() {
        let kind = EventKind::TimeSignature {
            numerator: 6,
            denominator: 8,
        };
        let encoded = event_to_smf(&kind).unwrap().unwrap();
        assert_eq!(
            encoded,
            TrackEventKind::Meta(MetaMessage::TimeSignature(6, 3, 24, 8))
        );
        assert_eq!(event_from_smf(&encoded), kind);

        let odd = EventKind::TimeSignature {
            numerator: 3,
            denominator: 3,
        };
        assert!(matches!(event_to_smf(&odd), Err(SmfError::Unencodable { .. })));
    }

    #[test]
    fn test_key_signature_maps_accidentals() {
        let encoded = TrackEventKind::Meta(MetaMessage::KeySignature(-2, false));
        assert_eq!(event_from_smf(&encoded), EventKind::KeySignature { key: 10 });

        let back = event_to_smf(&EventKind::KeySignature { key: 10 }).unwrap().unwrap();
        assert_eq!(back, encoded);
    }

    #[test]
    fn test_other_events_are_not_written() {
        assert!(event_to_smf(&EventKind::Other).unwrap().is_none());
    }

    #[test]
    fn test_every_track_ends_with_end_of_track() {
        let (raw, _) = sample_document().to_raw();
        let smf = raw_to_smf(&raw).unwrap();
        assert_eq!(smf.tracks.len(), 3);
        for track in &smf.tracks {
            assert_eq!(
                track.last().map(|e| e.kind),
                Some(TrackEventKind::Meta(MetaMessage::EndOfTrack))
            );
        }
    }

    #[test]
    fn test_rejects_resolution_beyond_fifteen_bits() {
        let raw = RawMidi::new(0x8000);
        assert!(matches!(raw_to_smf(&raw), Err(SmfError::Unencodable { .. })));
    }

    #[test]
    fn test_garbage_bytes_fail_to_parse() {
        let result = MidiDocument::from_bytes(b"not a midi file", &LoadOptions::default());
        assert!(matches!(result, Err(SmfError::Parse(_))));
    }

    #[test]
    fn test_single_track_file_is_a_load_error() {
        let mut raw = RawMidi::new(96);
        raw.format = FileFormat::SingleTrack;
        raw.push_track(vec![]);
        let smf = raw_to_smf(&raw).unwrap();
        let mut bytes = Vec::new();
        smf.write_std(&mut bytes).unwrap();

        let result = MidiDocument::from_bytes(&bytes, &LoadOptions::default());
        assert!(matches!(result, Err(SmfError::Load(LoadError::Format { .. }))));
    }
}
