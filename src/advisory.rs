//! Non-fatal warnings raised while loading or writing.
//!
//! Every advisory is logged with `log::warn!` when it is recorded, and the full
//! list is handed back to the caller next to the result.

/// A recoverable irregularity and the recovery that was applied
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// Track 0 carries note events; they are still resolved normally
    NotesOnMetaTrack,
    /// Tempo/key/time signature events outside track 0 were ignored
    MetaOffMetaTrack { track: usize },
    /// Track 0 meta event with values that fail validation; skipped
    InvalidMeta { tick: u32, reason: String },
    /// Note off without a matching open note; discarded
    SpuriousNoteOff { track: usize, channel: u8, pitch: u8, tick: u32 },
    /// Note off at the same tick as its note on; the close was ignored
    ZeroDurationNote { track: usize, channel: u8, pitch: u8, tick: u32 },
    /// Notes never closed before the end of the stream
    DanglingNotes { count: usize, closed: bool },
    /// Instruments past the 15 available melodic channels were not written
    TooManyInstruments { dropped: usize },
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Advisory::NotesOnMetaTrack => {
                write!(f, "Track 0 contains note information; this file may be invalid")
            }
            Advisory::MetaOffMetaTrack { track } => write!(
                f,
                "Tempo, key or time signature events found on track {}; only track 0 is used",
                track
            ),
            Advisory::InvalidMeta { tick, reason } => {
                write!(f, "Skipped invalid meta event at tick {}: {}", tick, reason)
            }
            Advisory::SpuriousNoteOff { track, channel, pitch, tick } => write!(
                f,
                "Ignored note off without note on (track {}, channel {}, pitch {}, tick {})",
                track, channel, pitch, tick
            ),
            Advisory::ZeroDurationNote { track, channel, pitch, tick } => write!(
                f,
                "Ignored zero-length note (track {}, channel {}, pitch {}, tick {})",
                track, channel, pitch, tick
            ),
            Advisory::DanglingNotes { count, closed } => {
                if *closed {
                    write!(f, "Closed {} notes still sounding at the end of their track", count)
                } else {
                    write!(f, "Dropped {} notes that were never released", count)
                }
            }
            Advisory::TooManyInstruments { dropped } => write!(
                f,
                "Writing more than 15 non-drum instruments is not supported; dropped {}",
                dropped
            ),
        }
    }
}

/// Ordered collection of advisories for one operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Advisories {
    items: Vec<Advisory>,
}

impl Advisories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and log an advisory
    pub fn push(&mut self, advisory: Advisory) {
        log::warn!("{}", advisory);
        self.items.push(advisory);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Advisory> {
        self.items.iter()
    }

    /// True if any recorded advisory satisfies `pred`
    pub fn any(&self, pred: impl Fn(&Advisory) -> bool) -> bool {
        self.items.iter().any(pred)
    }

    /// Move all advisories of `other` to the end of this list (already logged)
    pub fn extend(&mut self, other: Advisories) {
        self.items.extend(other.items);
    }

    pub fn into_vec(self) -> Vec<Advisory> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Advisories {
    type Item = &'a Advisory;
    type IntoIter = std::slice::Iter<'a, Advisory>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_query() {
        let mut adv = Advisories::new();
        assert!(adv.is_empty());
        adv.push(Advisory::NotesOnMetaTrack);
        adv.push(Advisory::TooManyInstruments { dropped: 2 });

        assert_eq!(adv.len(), 2);
        assert!(adv.any(|a| matches!(a, Advisory::TooManyInstruments { dropped: 2 })));
        assert!(!adv.any(|a| matches!(a, Advisory::DanglingNotes { .. })));
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut first = Advisories::new();
        first.push(Advisory::NotesOnMetaTrack);
        let mut second = Advisories::new();
        second.push(Advisory::MetaOffMetaTrack { track: 3 });

        first.extend(second);
        let items = first.into_vec();
        assert_eq!(items[1], Advisory::MetaOffMetaTrack { track: 3 });
    }
}
