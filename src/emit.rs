use crate::advisory::{Advisories, Advisory};
use crate::io::midi::{EventKind, RawMidi, TrackEvent};
use crate::model::{Instrument, MidiDocument};
use crate::DRUM_CHANNEL;

/// Melodic channels available to non-drum instruments (everything but 9)
pub const MELODIC_CHANNELS: [u8; 15] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 11, 12, 13, 14, 15];

/// Lay a document out as a multi-track event stream.
///
/// Track 0 carries key signatures, time signatures and tempo changes. Every
/// instrument then gets its own track: an optional track name, a program change
/// at tick 0 and its notes as note on / note off pairs. Drums play on channel 9;
/// other instruments take the free channels in order. Once the 15 melodic
/// channels are used up, the remaining instruments are left out.
pub fn emit_document(doc: &MidiDocument, advisories: &mut Advisories) -> RawMidi {
    let mut raw = RawMidi::new(doc.resolution());
    raw.push_track(meta_track(doc));

    let mut free_channels = MELODIC_CHANNELS.iter().copied();
    for (index, instrument) in doc.instruments.iter().enumerate() {
        let channel = if instrument.is_drum {
            DRUM_CHANNEL
        } else {
            match free_channels.next() {
                Some(channel) => channel,
                None => {
                    advisories.push(Advisory::TooManyInstruments {
                        dropped: doc.instruments.len() - index,
                    });
                    break;
                }
            }
        };
        raw.push_track(instrument_track(instrument, channel));
    }

    log::debug!("emitted {} tracks", raw.tracks.len());
    raw
}

fn meta_track(doc: &MidiDocument) -> Vec<TrackEvent> {
    let mut events: Vec<(u32, EventKind)> = Vec::new();
    events.extend(
        doc.key_signatures
            .iter()
            .map(|ks| (ks.tick, EventKind::KeySignature { key: ks.key })),
    );
    events.extend(doc.time_signatures.iter().map(|ts| {
        (
            ts.tick,
            EventKind::TimeSignature {
                numerator: ts.numerator,
                denominator: ts.denominator,
            },
        )
    }));
    events.extend(
        doc.tempo_changes
            .iter()
            .map(|tc| (tc.tick, EventKind::SetTempo { tempo: tc.tempo })),
    );
    events.sort_by_key(|(tick, _)| *tick);
    to_deltas(events)
}

fn instrument_track(instrument: &Instrument, channel: u8) -> Vec<TrackEvent> {
    let mut header = Vec::with_capacity(2);
    if !instrument.name.is_empty() {
        header.push((0, EventKind::TrackName(instrument.name.clone())));
    }
    header.push((
        0,
        EventKind::ProgramChange {
            channel,
            program: instrument.program,
        },
    ));

    // A note ending where the next one on the same pitch starts must be
    // written before it, so pair events in (start, end) order
    let mut ordered = instrument.notes.clone();
    ordered.sort_by_key(|n| (n.start, n.end));

    let mut notes: Vec<(u32, EventKind)> = Vec::with_capacity(ordered.len() * 2);
    for note in &ordered {
        notes.push((
            note.start,
            EventKind::NoteOn {
                channel,
                note: note.pitch,
                velocity: note.velocity,
            },
        ));
        notes.push((
            note.end,
            EventKind::NoteOff {
                channel,
                note: note.pitch,
                velocity: 0,
            },
        ));
    }
    notes.sort_by_key(|(tick, _)| *tick);

    header.extend(notes);
    to_deltas(header)
}

/// Absolute ticks (already sorted) to deltas against the previous event
fn to_deltas(events: Vec<(u32, EventKind)>) -> Vec<TrackEvent> {
    let mut now = 0;
    events
        .into_iter()
        .map(|(tick, kind)| {
            let delta = tick - now;
            now = tick;
            TrackEvent::new(delta, kind)
        })
        .collect()
}
