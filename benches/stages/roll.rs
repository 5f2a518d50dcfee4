//! Benchmarks for piano roll encode and decode.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use midiroll::roll::{decode, encode};
use midiroll::{LoadOptions, MidiDocument};

use crate::{synthetic_raw, NOTE_COUNTS};

pub fn bench_roll(c: &mut Criterion) {
    let mut group = c.benchmark_group("roll");

    for &notes in NOTE_COUNTS {
        let document = MidiDocument::from_raw(
            &synthetic_raw(notes),
            &LoadOptions::new().resolution(24),
        )
        .expect("synthetic stream loads")
        .document;
        let instrument = &document.instruments[0];

        group.bench_with_input(BenchmarkId::new("encode", notes), &notes, |b, _| {
            b.iter(|| encode(black_box(&instrument.notes), None))
        });

        let roll = encode(&instrument.notes, None);
        group.bench_with_input(BenchmarkId::new("decode", notes), &notes, |b, _| {
            b.iter(|| decode(black_box(&roll)))
        });
    }

    group.finish();
}
