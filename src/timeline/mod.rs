//! Absolute-tick view of a delta-timed event stream

pub mod meta_track;
pub mod normalize;

pub use meta_track::{extract_meta, MetaEvents};
pub use normalize::{normalize, MAX_TICK};

use crate::io::midi::EventKind;

/// Event positioned at an absolute tick of its track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsoluteEvent {
    pub tick: u32,
    pub kind: EventKind,
}

/// All tracks of a file on one shared tick axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    /// Ticks per beat
    pub resolution: u32,
    pub tracks: Vec<Vec<AbsoluteEvent>>,
}

impl Timeline {
    /// Latest event tick across all tracks
    pub fn max_tick(&self) -> u32 {
        self.tracks
            .iter()
            .filter_map(|track| track.iter().map(|e| e.tick).max())
            .max()
            .unwrap_or(0)
    }

    /// Last event tick of one track, 0 for an empty or missing track
    pub fn track_end(&self, track: usize) -> u32 {
        self.tracks
            .get(track)
            .and_then(|events| events.iter().map(|e| e.tick).max())
            .unwrap_or(0)
    }
}
