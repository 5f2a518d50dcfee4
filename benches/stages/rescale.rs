//! Benchmarks for resolution changes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use midiroll::rescale::ShortNotePolicy;
use midiroll::{LoadOptions, MidiDocument};

use crate::{synthetic_raw, NOTE_COUNTS};

pub fn bench_rescale(c: &mut Criterion) {
    let mut group = c.benchmark_group("rescale");

    for &notes in NOTE_COUNTS {
        let document = MidiDocument::from_raw(&synthetic_raw(notes), &LoadOptions::default())
            .expect("synthetic stream loads")
            .document;

        // 480 -> 96 ticks per beat, the usual downsampling before a roll
        group.bench_with_input(BenchmarkId::new("480_to_96", notes), &notes, |b, _| {
            b.iter(|| {
                let mut doc = document.clone();
                doc.change_resolution(black_box(96), ShortNotePolicy::Extend)
                    .expect("positive resolution");
                doc
            })
        });
    }

    group.finish();
}
