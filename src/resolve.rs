/*
Instrument Resolution
=====================

A type 1 MIDI file spreads its notes over tracks, and each track can use any
of the 16 channels. Which timbre a channel plays is decided by the most recent
program change on that channel, and a program change on one track affects the
channel on every track. So notes are resolved in one pass over all tracks at
once:

1. program changes, note ons and note offs of every track are merged and
   stable-sorted by tick (ties keep track order, then event order)
2. a per-channel program register follows the program changes
3. a note on opens a note keyed by (track, channel, pitch) and remembers the
   program active at that moment
4. a note off (or note on with velocity 0) closes the open note and hands it
   to the instrument keyed by (program, channel, track), created on first use

Instruments live in an arena in creation order; the key table only stores
indices into it.
*/

use std::collections::HashMap;

use crate::advisory::{Advisories, Advisory};
use crate::io::midi::EventKind;
use crate::model::{Instrument, Note};
use crate::timeline::Timeline;
use crate::DRUM_CHANNEL;

const CHANNELS: usize = 16;

/// How notes still open when their track ends are treated
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DanglingNotes {
    /// Never emitted
    #[default]
    Drop,
    /// Closed at the last tick of their track, when that is after their start
    CloseAtTrackEnd,
}

/// (track, channel, pitch)
type OpenKey = (usize, u8, u8);
/// (program, channel, track)
type InstrumentKey = (u8, u8, usize);

#[derive(Debug, Clone, Copy)]
struct OpenNote {
    program: u8,
    velocity: u8,
    start: u32,
}

/// Note-relevant event with its track index
#[derive(Debug, Clone, Copy)]
enum Action {
    Program { channel: u8, program: u8 },
    Open { channel: u8, pitch: u8, velocity: u8 },
    Close { channel: u8, pitch: u8 },
}

#[derive(Debug, Clone, Copy)]
struct Stamped {
    tick: u32,
    track: usize,
    action: Action,
}

/// Per-document resolution state: program registers, open notes, instrument arena
struct Resolver<'a> {
    programs: [u8; CHANNELS],
    open: HashMap<OpenKey, OpenNote>,
    arena: Vec<Instrument>,
    index: HashMap<InstrumentKey, usize>,
    track_names: &'a [String],
}

impl<'a> Resolver<'a> {
    fn new(track_names: &'a [String]) -> Self {
        Self {
            programs: [0; CHANNELS],
            open: HashMap::new(),
            arena: Vec::new(),
            index: HashMap::new(),
            track_names,
        }
    }

    fn apply(&mut self, event: Stamped, advisories: &mut Advisories) {
        match event.action {
            Action::Program { channel, program } => {
                self.programs[channel as usize] = program;
            }
            Action::Open {
                channel,
                pitch,
                velocity,
            } => {
                // Re-opening the same key replaces the earlier note on
                self.open.insert(
                    (event.track, channel, pitch),
                    OpenNote {
                        program: self.programs[channel as usize],
                        velocity,
                        start: event.tick,
                    },
                );
            }
            Action::Close { channel, pitch } => {
                let key = (event.track, channel, pitch);
                let Some(open) = self.open.get(&key).copied() else {
                    advisories.push(Advisory::SpuriousNoteOff {
                        track: event.track,
                        channel,
                        pitch,
                        tick: event.tick,
                    });
                    return;
                };
                if open.start == event.tick {
                    // Leave the note open so a later note off can still close it
                    advisories.push(Advisory::ZeroDurationNote {
                        track: event.track,
                        channel,
                        pitch,
                        tick: event.tick,
                    });
                    return;
                }
                self.open.remove(&key);
                self.emit(event.track, channel, pitch, open, event.tick);
            }
        }
    }

    fn emit(&mut self, track: usize, channel: u8, pitch: u8, open: OpenNote, end: u32) {
        let slot = self.instrument(open.program, channel, track);
        self.arena[slot].add_note(Note {
            velocity: open.velocity,
            pitch,
            start: open.start,
            end,
        });
    }

    /// Arena index of the instrument for (program, channel, track), created on first use
    fn instrument(&mut self, program: u8, channel: u8, track: usize) -> usize {
        if let Some(&slot) = self.index.get(&(program, channel, track)) {
            return slot;
        }
        let name = self.track_names.get(track).cloned().unwrap_or_default();
        self.arena.push(Instrument {
            program,
            is_drum: channel == DRUM_CHANNEL,
            name,
            notes: Vec::new(),
        });
        let slot = self.arena.len() - 1;
        self.index.insert((program, channel, track), slot);
        slot
    }

    /// Deal with notes nobody closed
    fn finish(
        mut self,
        timeline: &Timeline,
        dangling: DanglingNotes,
        advisories: &mut Advisories,
    ) -> Vec<Instrument> {
        if !self.open.is_empty() {
            let mut leftovers: Vec<(OpenKey, OpenNote)> = self.open.drain().collect();
            let count = leftovers.len();
            if dangling == DanglingNotes::CloseAtTrackEnd {
                // HashMap order is arbitrary; close in a reproducible order
                leftovers.sort_by_key(|&((track, channel, pitch), open)| (open.start, track, channel, pitch));
                for ((track, channel, pitch), open) in leftovers {
                    let end = timeline.track_end(track);
                    if end > open.start {
                        self.emit(track, channel, pitch, open, end);
                    }
                }
            }
            advisories.push(Advisory::DanglingNotes {
                count,
                closed: dangling == DanglingNotes::CloseAtTrackEnd,
            });
        }
        self.arena
    }
}

/// Reconstruct per-instrument notes from every track of a timeline.
///
/// Instruments are returned in the order they were first needed. Spurious and
/// zero-length note offs are reported and skipped; nothing here is fatal.
pub fn resolve_instruments(
    timeline: &Timeline,
    dangling: DanglingNotes,
    advisories: &mut Advisories,
) -> Vec<Instrument> {
    let track_names: Vec<String> = timeline
        .tracks
        .iter()
        .map(|events| {
            events
                .iter()
                .filter_map(|e| match &e.kind {
                    EventKind::TrackName(name) => Some(name.clone()),
                    _ => None,
                })
                .last()
                .unwrap_or_default()
        })
        .collect();

    let mut stream: Vec<Stamped> = timeline
        .tracks
        .iter()
        .enumerate()
        .flat_map(|(track, events)| {
            events.iter().filter_map(move |e| {
                to_action(&e.kind).map(|action| Stamped {
                    tick: e.tick,
                    track,
                    action,
                })
            })
        })
        .collect();
    // sort_by_key is stable: equal ticks keep track order, then file order
    stream.sort_by_key(|e| e.tick);

    let mut resolver = Resolver::new(&track_names);
    for event in stream {
        resolver.apply(event, advisories);
    }
    let instruments = resolver.finish(timeline, dangling, advisories);

    log::debug!(
        "resolved {} instruments with {} notes",
        instruments.len(),
        instruments.iter().map(|i| i.notes.len()).sum::<usize>()
    );
    instruments
}

fn to_action(kind: &EventKind) -> Option<Action> {
    match *kind {
        EventKind::ProgramChange { channel, program } => Some(Action::Program {
            channel: channel & 0x0F,
            program: program & 0x7F,
        }),
        EventKind::NoteOn {
            channel,
            note,
            velocity,
        } if velocity > 0 => Some(Action::Open {
            channel: channel & 0x0F,
            pitch: note & 0x7F,
            velocity: velocity & 0x7F,
        }),
        EventKind::NoteOn { channel, note, .. } | EventKind::NoteOff { channel, note, .. } => {
            Some(Action::Close {
                channel: channel & 0x0F,
                pitch: note & 0x7F,
            })
        }
        _ => None,
    }
}
