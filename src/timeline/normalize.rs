use super::{AbsoluteEvent, Timeline};
use crate::error::LoadError;
use crate::io::midi::{FileFormat, RawMidi};

/// The largest tick a sane file is expected to reach (exclusive)
pub const MAX_TICK: u64 = 10_000_000;

/// Convert per-track delta times into absolute ticks.
///
/// Only multi-track (type 1) files with at least two tracks are accepted: track 0
/// carries meta data and the remaining tracks carry notes. A file whose
/// largest tick reaches [`MAX_TICK`] is rejected as corrupt.
pub fn normalize(raw: &RawMidi) -> Result<Timeline, LoadError> {
    if raw.format != FileFormat::MultiTrack {
        return Err(LoadError::Format {
            reason: format!("{:?} files are not supported, expected a multi-track file", raw.format),
        });
    }
    if raw.tracks.len() <= 1 {
        return Err(LoadError::Format {
            reason: format!("file has {} track(s), at least 2 are required", raw.tracks.len()),
        });
    }

    // Accumulate in u64 so a hostile file cannot overflow before the check
    let mut max_tick = 0u64;
    let mut absolute: Vec<Vec<(u64, usize)>> = Vec::with_capacity(raw.tracks.len());
    for track in &raw.tracks {
        let mut tick = 0u64;
        let mut ticks = Vec::with_capacity(track.len());
        for (index, event) in track.iter().enumerate() {
            tick += event.delta as u64;
            ticks.push((tick, index));
        }
        max_tick = max_tick.max(tick);
        absolute.push(ticks);
    }

    if max_tick >= MAX_TICK {
        return Err(LoadError::Corruption { max_tick });
    }

    let tracks = raw
        .tracks
        .iter()
        .zip(absolute)
        .map(|(track, ticks)| {
            ticks
                .into_iter()
                .map(|(tick, index)| AbsoluteEvent {
                    tick: tick as u32,
                    kind: track[index].kind.clone(),
                })
                .collect()
        })
        .collect();

    log::debug!(
        "normalized {} tracks at resolution {}, last tick {}",
        raw.tracks.len(),
        raw.resolution,
        max_tick
    );

    Ok(Timeline {
        resolution: raw.resolution,
        tracks,
    })
}
