use crate::error::ValueError;
use crate::model::{Instrument, Note};

/// What to do with a note whose start and end round to the same tick
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortNotePolicy {
    /// Keep the note, one tick long
    #[default]
    Extend,
    /// Remove the note
    Drop,
}

/// Exact ratio `target / current` applied with round-half-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickScale {
    target: u64,
    current: u64,
}

impl TickScale {
    /// Both resolutions must be positive
    pub fn new(current: u32, target: u32) -> Result<Self, ValueError> {
        if current == 0 {
            return Err(ValueError::NotPositive { field: "resolution" });
        }
        if target == 0 {
            return Err(ValueError::NotPositive { field: "target resolution" });
        }
        Ok(Self {
            target: target as u64,
            current: current as u64,
        })
    }

    pub fn is_identity(&self) -> bool {
        self.target == self.current
    }

    /// round(tick * target / current), halves rounding up, saturating at `u32::MAX`
    pub fn apply(&self, tick: u32) -> u32 {
        u32::try_from(self.scaled(tick)).unwrap_or(u32::MAX)
    }

    /// Whether `tick` rescales below `u32::MAX`, leaving room to extend a collapsed note
    pub fn fits(&self, tick: u32) -> bool {
        self.scaled(tick) < u32::MAX as u64
    }

    fn scaled(&self, tick: u32) -> u64 {
        (tick as u64 * self.target * 2 + self.current) / (self.current * 2)
    }

    /// Rescaled copy of `note`, or `None` when the policy drops it
    pub fn note(&self, note: &Note, policy: ShortNotePolicy) -> Option<Note> {
        let start = self.apply(note.start);
        let mut end = self.apply(note.end);
        if start >= end {
            match policy {
                ShortNotePolicy::Drop => return None,
                ShortNotePolicy::Extend => end = start.saturating_add(1),
            }
        }
        Some(Note { start, end, ..*note })
    }
}

/// Rescale the notes of every instrument from `current` to `target` ticks per beat.
///
/// Either every note is rescaled or, on error, nothing is touched. Meta event
/// ticks are not part of this operation.
pub fn rescale_instruments(
    instruments: &mut [Instrument],
    current: u32,
    target: u32,
    policy: ShortNotePolicy,
) -> Result<(), ValueError> {
    let scale = TickScale::new(current, target)?;
    if scale.is_identity() {
        return Ok(());
    }

    let overflow = instruments
        .iter()
        .flat_map(|i| &i.notes)
        .map(|n| n.start.max(n.end))
        .find(|&tick| !scale.fits(tick));
    if let Some(tick) = overflow {
        return Err(ValueError::TickOverflow { tick, target });
    }

    for instrument in instruments.iter_mut() {
        let notes = instrument
            .notes
            .iter()
            .filter_map(|n| scale.note(n, policy))
            .collect();
        instrument.notes = notes;
    }

    log::debug!("rescaled notes from {} to {} ticks per beat", current, target);
    Ok(())
}
