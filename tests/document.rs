use midiroll::io::midi::{EventKind, FileFormat, RawMidi, TrackEvent};
use midiroll::model::{KeySignature, TempoChange, TimeSignature};
use midiroll::rescale::ShortNotePolicy;
use midiroll::roll::{decode, encode};
use midiroll::{Advisory, Instrument, LoadError, LoadOptions, MidiDocument, Note, PianoRoll};

fn instrument(program: u8, is_drum: bool, name: &str, notes: &[(u8, u8, u32, u32)]) -> Instrument {
    let mut inst = Instrument::new(program, is_drum, name).unwrap();
    for &(velocity, pitch, start, end) in notes {
        inst.add_note(Note::new(velocity, pitch, start, end).unwrap());
    }
    inst
}

/// Notes listed in note-off order, instruments in the order their first note ends
fn canonical_document() -> MidiDocument {
    let mut doc = MidiDocument::new(220).unwrap();
    doc.tempo_changes = vec![
        TempoChange::new(500_000, 0).unwrap(),
        TempoChange::from_bpm(90.0, 1760).unwrap(),
    ];
    doc.time_signatures = vec![
        TimeSignature::new(4, 4, 0).unwrap(),
        TimeSignature::new(7, 8, 1760).unwrap(),
    ];
    doc.key_signatures = vec![KeySignature::new(3, 0).unwrap()];

    doc.add_instrument(instrument(
        0,
        false,
        "Piano",
        &[(100, 60, 0, 110), (90, 64, 0, 220), (80, 60, 220, 440)],
    ));
    doc.add_instrument(instrument(33, false, "Bass", &[(70, 36, 0, 440), (70, 43, 440, 880)]));
    doc.add_instrument(instrument(0, true, "Kit", &[(127, 36, 440, 450), (127, 42, 660, 670)]));
    doc
}

fn reload(doc: &MidiDocument) -> MidiDocument {
    let (raw, advisories) = doc.to_raw();
    assert!(advisories.is_empty());
    let loaded = MidiDocument::from_raw(&raw, &LoadOptions::default()).unwrap();
    assert!(loaded.advisories.is_empty(), "{:?}", loaded.advisories);
    loaded.document
}

#[test]
fn emit_then_load_is_identity() {
    let doc = canonical_document();
    assert_eq!(reload(&doc), doc);
}

#[test]
fn rescale_to_same_resolution_changes_nothing() {
    let mut doc = canonical_document();
    let before = doc.clone();
    doc.change_resolution(220, ShortNotePolicy::Drop).unwrap();
    assert_eq!(doc, before);
}

#[test]
fn rescale_shrinks_and_keeps_short_notes() {
    let mut doc = canonical_document();
    doc.change_resolution(22, ShortNotePolicy::Extend).unwrap();

    assert_eq!(doc.resolution(), 22);
    assert_eq!(
        doc.instruments[2].notes,
        vec![Note::new(127, 36, 44, 45).unwrap(), Note::new(127, 42, 66, 67).unwrap()]
    );
    assert!(doc.instruments.iter().flat_map(|i| &i.notes).all(Note::is_valid));
}

#[test]
fn rescale_can_drop_short_notes() {
    let mut doc = canonical_document();
    doc.change_resolution(4, ShortNotePolicy::Drop).unwrap();
    // 10-tick drum hits round to nothing at 4 ticks per beat
    assert!(doc.instruments[2].notes.is_empty());
    assert_eq!(doc.instruments[1].notes[0], Note::new(70, 36, 0, 8).unwrap());
}

#[test]
fn piano_roll_round_trip_keeps_notes() {
    let doc = canonical_document();
    let bass = &doc.instruments[1];
    let roll = bass.piano_roll(None);
    assert_eq!(roll.frames(), 880);
    assert_eq!(decode(&roll), bass.notes);
}

#[test]
fn piano_roll_scenario() {
    let mut cells = vec![0u32; 7 * 128];
    for frame in 2..5 {
        cells[frame * 128 + 60] = 5;
    }
    let roll = PianoRoll::from_vec(7, cells).unwrap();
    assert_eq!(decode(&roll), vec![Note::new(5, 60, 2, 5).unwrap()]);

    let doc = MidiDocument::from_piano_roll(&roll, 100, 0, false, 120.0).unwrap();
    assert_eq!(doc.tempo_changes, vec![TempoChange::new(500_000, 0).unwrap()]);
    assert_eq!(encode(&doc.instruments[0].notes, Some(7)), roll);
}

#[test]
fn program_changes_follow_channels_across_tracks() {
    let mut raw = RawMidi::new(96);
    raw.push_track(vec![TrackEvent::new(0, EventKind::ProgramChange { channel: 2, program: 56 })]);
    raw.push_track(vec![
        TrackEvent::new(0, EventKind::NoteOn { channel: 2, note: 72, velocity: 99 }),
        TrackEvent::new(48, EventKind::NoteOff { channel: 2, note: 72, velocity: 64 }),
    ]);

    let doc = MidiDocument::from_raw(&raw, &LoadOptions::default()).unwrap().document;
    assert_eq!(doc.instruments.len(), 1);
    assert_eq!(doc.instruments[0].program, 56);
    assert!(!doc.instruments[0].is_drum);
}

#[test]
fn rejected_layouts() {
    let mut single = RawMidi::new(96);
    single.push_track(vec![]);
    assert!(matches!(
        MidiDocument::from_raw(&single, &LoadOptions::default()),
        Err(LoadError::Format { .. })
    ));

    let mut sequential = RawMidi::new(96);
    sequential.format = FileFormat::MultiSong;
    sequential.push_track(vec![]);
    sequential.push_track(vec![]);
    assert!(matches!(
        MidiDocument::from_raw(&sequential, &LoadOptions::default()),
        Err(LoadError::Format { .. })
    ));

    let mut corrupt = RawMidi::new(96);
    corrupt.push_track(vec![]);
    corrupt.push_track(vec![
        TrackEvent::new(6_000_000, EventKind::Other),
        TrackEvent::new(6_000_000, EventKind::Other),
    ]);
    assert!(matches!(
        MidiDocument::from_raw(&corrupt, &LoadOptions::default()),
        Err(LoadError::Corruption { max_tick: 12_000_000 })
    ));
}

#[test]
fn too_many_instruments_are_reported_on_write() {
    let mut doc = MidiDocument::new(96).unwrap();
    for program in 0..17 {
        doc.add_instrument(instrument(program, false, "", &[(64, 60, 0, 10)]));
    }
    let (raw, advisories) = doc.to_raw();
    assert_eq!(raw.tracks.len(), 16);
    assert!(advisories.any(|a| *a == Advisory::TooManyInstruments { dropped: 2 }));
}

#[cfg(feature = "smf")]
mod smf {
    use super::*;

    #[test]
    fn file_round_trip() {
        let doc = canonical_document();
        let path = std::env::temp_dir().join(format!("midiroll-{}.mid", std::process::id()));

        let advisories = doc.write(&path).unwrap();
        assert!(advisories.is_empty());
        let loaded = MidiDocument::from_file(&path, &LoadOptions::default()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(loaded.advisories.is_empty());
        assert_eq!(loaded.document, doc);
    }

    #[test]
    fn load_time_resolution() {
        let (bytes, _) = canonical_document().to_bytes().unwrap();
        let loaded = MidiDocument::from_bytes(&bytes, &LoadOptions::new().resolution(440)).unwrap();
        let doc = loaded.into_document();
        assert_eq!(doc.resolution(), 440);
        assert_eq!(doc.instruments[0].notes[0], Note::new(100, 60, 0, 220).unwrap());
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = MidiDocument::from_file("/definitely/not/here.mid", &LoadOptions::default());
        assert!(matches!(result, Err(midiroll::io::converter::SmfError::Io(_))));
    }
}
