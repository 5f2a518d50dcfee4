use super::Timeline;
use crate::advisory::{Advisories, Advisory};
use crate::error::ValueError;
use crate::io::midi::EventKind;
use crate::model::{KeySignature, TempoChange, TimeSignature};

/// Tempo, key and time signature changes read from track 0, each ordered by tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaEvents {
    pub tempo_changes: Vec<TempoChange>,
    pub time_signatures: Vec<TimeSignature>,
    pub key_signatures: Vec<KeySignature>,
}

/// Collect the meta data of track 0.
///
/// Notes on track 0 and meta events on other tracks are reported once each and
/// otherwise left alone; only track 0 meta data is used.
pub fn extract_meta(timeline: &Timeline, advisories: &mut Advisories) -> MetaEvents {
    let mut meta = MetaEvents::default();
    let mut saw_notes = false;

    if let Some(track) = timeline.tracks.first() {
        for event in track {
            let parsed = match &event.kind {
                EventKind::SetTempo { tempo } => {
                    TempoChange::new(*tempo, event.tick).map(|tc| meta.tempo_changes.push(tc))
                }
                EventKind::TimeSignature {
                    numerator,
                    denominator,
                } => TimeSignature::new(*numerator, *denominator, event.tick)
                    .map(|ts| meta.time_signatures.push(ts)),
                EventKind::KeySignature { key } => {
                    KeySignature::new(*key, event.tick).map(|ks| meta.key_signatures.push(ks))
                }
                kind if kind.is_note() => {
                    saw_notes = true;
                    Ok(())
                }
                _ => Ok(()),
            };
            if let Err(err) = parsed {
                advisories.push(invalid_meta(event.tick, err));
            }
        }
    }

    if saw_notes {
        advisories.push(Advisory::NotesOnMetaTrack);
    }

    if let Some(track) = timeline
        .tracks
        .iter()
        .skip(1)
        .position(|events| events.iter().any(|e| e.kind.is_timing_meta()))
    {
        advisories.push(Advisory::MetaOffMetaTrack { track: track + 1 });
    }

    // Events of one track are already in tick order; keep the sort stable anyway
    meta.tempo_changes.sort_by_key(|tc| tc.tick);
    meta.time_signatures.sort_by_key(|ts| ts.tick);
    meta.key_signatures.sort_by_key(|ks| ks.tick);

    meta
}

fn invalid_meta(tick: u32, err: ValueError) -> Advisory {
    Advisory::InvalidMeta {
        tick,
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::AbsoluteEvent;

    fn at(tick: u32, kind: EventKind) -> AbsoluteEvent {
        AbsoluteEvent { tick, kind }
    }

    #[test]
    fn test_reads_track_zero_meta() {
        let timeline = Timeline {
            resolution: 96,
            tracks: vec![
                vec![
                    at(0, EventKind::TrackName("conductor".into())),
                    at(0, EventKind::SetTempo { tempo: 500_000 }),
                    at(0, EventKind::TimeSignature { numerator: 3, denominator: 4 }),
                    at(0, EventKind::KeySignature { key: 7 }),
                    at(384, EventKind::SetTempo { tempo: 400_000 }),
                ],
                vec![],
            ],
        };
        let mut adv = Advisories::new();
        let meta = extract_meta(&timeline, &mut adv);

        assert!(adv.is_empty());
        assert_eq!(
            meta.tempo_changes,
            vec![
                TempoChange::new(500_000, 0).unwrap(),
                TempoChange::new(400_000, 384).unwrap()
            ]
        );
        assert_eq!(meta.time_signatures, vec![TimeSignature::new(3, 4, 0).unwrap()]);
        assert_eq!(meta.key_signatures, vec![KeySignature::new(7, 0).unwrap()]);
    }

    #[test]
    fn test_ignores_meta_on_other_tracks() {
        let timeline = Timeline {
            resolution: 96,
            tracks: vec![
                vec![],
                vec![at(10, EventKind::SetTempo { tempo: 300_000 })],
                vec![at(20, EventKind::KeySignature { key: 2 })],
            ],
        };
        let mut adv = Advisories::new();
        let meta = extract_meta(&timeline, &mut adv);

        assert!(meta.tempo_changes.is_empty());
        assert!(meta.key_signatures.is_empty());
        // Reported once, naming the first offending track
        assert_eq!(adv.into_vec(), vec![Advisory::MetaOffMetaTrack { track: 1 }]);
    }

    #[test]
    fn test_warns_about_notes_on_track_zero() {
        let note = EventKind::NoteOn {
            channel: 0,
            note: 60,
            velocity: 90,
        };
        let timeline = Timeline {
            resolution: 96,
            tracks: vec![vec![at(0, note.clone()), at(5, note)], vec![]],
        };
        let mut adv = Advisories::new();
        extract_meta(&timeline, &mut adv);

        assert_eq!(adv.into_vec(), vec![Advisory::NotesOnMetaTrack]);
    }

    #[test]
    fn test_skips_invalid_meta_values() {
        let timeline = Timeline {
            resolution: 96,
            tracks: vec![
                vec![
                    at(0, EventKind::TimeSignature { numerator: 0, denominator: 4 }),
                    at(0, EventKind::SetTempo { tempo: 0 }),
                    at(0, EventKind::KeySignature { key: 24 }),
                    at(0, EventKind::TimeSignature { numerator: 4, denominator: 4 }),
                ],
                vec![],
            ],
        };
        let mut adv = Advisories::new();
        let meta = extract_meta(&timeline, &mut adv);

        assert_eq!(meta.time_signatures.len(), 1);
        assert!(meta.key_signatures.is_empty());
        // A zero tempo is kept
        assert_eq!(meta.tempo_changes, vec![TempoChange::new(0, 0).unwrap()]);
        assert_eq!(adv.len(), 2);
        assert!(adv.any(|a| matches!(a, Advisory::InvalidMeta { tick: 0, .. })));
    }
}
