//! Benchmarks for building a document from an event stream.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use midiroll::{LoadOptions, MidiDocument};

use crate::{synthetic_raw, NOTE_COUNTS};

pub fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    let options = LoadOptions::default();

    for &notes in NOTE_COUNTS {
        let raw = synthetic_raw(notes);
        group.bench_with_input(BenchmarkId::new("from_raw", notes), &notes, |b, _| {
            b.iter(|| MidiDocument::from_raw(black_box(&raw), black_box(&options)))
        });

        let document = MidiDocument::from_raw(&raw, &options)
            .expect("synthetic stream loads")
            .document;
        group.bench_with_input(BenchmarkId::new("to_raw", notes), &notes, |b, _| {
            b.iter(|| black_box(&document).to_raw())
        });
    }

    group.finish();
}
