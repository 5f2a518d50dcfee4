use crate::error::ValueError;

/// Default tempo of a MIDI file with no tempo event (120 bpm)
pub const DEFAULT_TEMPO: u32 = 500_000;

const MAX_TEMPO: u32 = 0xFF_FFFF;
const MICROS_PER_MINUTE: f64 = 60_000_000.0;

/// Tempo change at an absolute tick
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoChange {
    /// Microseconds per quarter note, as stored in a set-tempo event
    pub tempo: u32,
    pub tick: u32,
}

impl TempoChange {
    /// Create from microseconds per quarter note (0..=0xFFFFFF)
    pub fn new(tempo: u32, tick: u32) -> Result<Self, ValueError> {
        if tempo > MAX_TEMPO {
            return Err(ValueError::OutOfRange {
                field: "tempo",
                value: tempo,
                max: MAX_TEMPO,
            });
        }
        Ok(Self { tempo, tick })
    }

    /// Create from beats per minute
    pub fn from_bpm(bpm: f64, tick: u32) -> Result<Self, ValueError> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(ValueError::InvalidTempo { bpm });
        }
        let tempo = (MICROS_PER_MINUTE / bpm).round();
        if tempo < 1.0 || tempo > MAX_TEMPO as f64 {
            return Err(ValueError::InvalidTempo { bpm });
        }
        Self::new(tempo as u32, tick)
    }

    /// Beats per minute, 0 for a zero tempo
    pub fn bpm(&self) -> f64 {
        if self.tempo == 0 {
            return 0.0;
        }
        MICROS_PER_MINUTE / self.tempo as f64
    }
}

impl std::fmt::Display for TempoChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tempo changes to {:.2} bpm at tick {}", self.bpm(), self.tick)
    }
}

const KEY_NAMES: [&str; 12] = ["C", "Db", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B"];

/// Key signature change at an absolute tick
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySignature {
    /// 0-11: C..B major, 12-23: C..B minor
    pub key: u8,
    pub tick: u32,
}

impl KeySignature {
    pub fn new(key: u8, tick: u32) -> Result<Self, ValueError> {
        if key > 23 {
            return Err(ValueError::OutOfRange {
                field: "key",
                value: key as u32,
                max: 23,
            });
        }
        Ok(Self { key, tick })
    }

    /// Build from the SMF representation: sharps (positive) or flats (negative), and mode.
    ///
    /// Key ids name each pitch class once, so seven sharps or flats land on the
    /// enharmonic key: C# major (7 sharps) becomes Db and [`KeySignature::accidentals`]
    /// then reports 5 flats.
    pub fn from_accidentals(accidentals: i8, minor: bool, tick: u32) -> Result<Self, ValueError> {
        if !(-7..=7).contains(&accidentals) {
            return Err(ValueError::OutOfRange {
                field: "accidentals",
                value: accidentals.unsigned_abs() as u32,
                max: 7,
            });
        }
        let major_root = (accidentals as i32 * 7).rem_euclid(12) as u8;
        let key = if minor { (major_root + 9) % 12 + 12 } else { major_root };
        Self::new(key, tick)
    }

    pub fn is_minor(&self) -> bool {
        self.key >= 12
    }

    /// Pitch class of the tonic (0 = C)
    pub fn tonic(&self) -> u8 {
        self.key % 12
    }

    /// Sharps (positive) or flats (negative) in the signature, between -6 and 6
    pub fn accidentals(&self) -> i8 {
        let major_root = if self.is_minor() {
            (self.tonic() + 3) % 12
        } else {
            self.tonic()
        };
        let n = (major_root as i32 * 7).rem_euclid(12);
        if n > 6 {
            (n - 12) as i8
        } else {
            n as i8
        }
    }

    /// Name such as "Eb" or "F#m"
    pub fn name(&self) -> String {
        let root = KEY_NAMES[self.tonic() as usize];
        if self.is_minor() {
            format!("{}m", root)
        } else {
            root.to_string()
        }
    }
}

impl std::fmt::Display for KeySignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at tick {}", self.name(), self.tick)
    }
}
