/// Rejected input to a value constructor (note, meta event, piano roll, ...)
#[derive(Debug, Clone, PartialEq)]
pub enum ValueError {
    /// A 7-bit MIDI field (pitch, velocity, program) above 127
    OutOfRange { field: &'static str, value: u32, max: u32 },
    /// A field that must be strictly positive was zero
    NotPositive { field: &'static str },
    /// Tempo or bpm that does not describe a usable tempo
    InvalidTempo { bpm: f64 },
    /// Piano roll buffer whose length is not frames * 128
    RollShape { len: usize, frames: usize },
    /// Merging a drum instrument with a melodic one
    DrumMismatch,
    /// A tick that no longer fits in 32 bits (with room for one more) after rescaling
    TickOverflow { tick: u32, target: u32 },
}

impl std::fmt::Display for ValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueError::OutOfRange { field, value, max } => {
                write!(f, "{} is not a valid `{}` value (expected 0..={})", value, field, max)
            }
            ValueError::NotPositive { field } => {
                write!(f, "`{}` must be greater than zero", field)
            }
            ValueError::InvalidTempo { bpm } => {
                write!(f, "{} is not a valid tempo", bpm)
            }
            ValueError::RollShape { len, frames } => {
                write!(
                    f,
                    "Piano roll must have shape [frames x 128]: {} cells cannot hold {} frames",
                    len, frames
                )
            }
            ValueError::TickOverflow { tick, target } => {
                write!(f, "Tick {} is out of range at {} ticks per beat", tick, target)
            }
            ValueError::DrumMismatch => {
                write!(f, "Cannot merge a drum instrument with a non-drum instrument")
            }
        }
    }
}

impl std::error::Error for ValueError {}

/// Fatal problems found while ingesting an event stream. No partial document is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// Not a multi-track (type 1) file, or too few tracks to hold meta data and notes
    Format { reason: String },
    /// Largest absolute tick is implausibly large
    Corruption { max_tick: u64 },
    /// Requested load-time resolution is not usable
    Value(ValueError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Format { reason } => write!(f, "Unsupported MIDI layout: {}", reason),
            LoadError::Corruption { max_tick } => {
                write!(f, "MIDI file has a largest tick of {}, it is likely corrupt", max_tick)
            }
            LoadError::Value(err) => write!(f, "Invalid load option: {}", err),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Value(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValueError> for LoadError {
    fn from(err: ValueError) -> Self {
        LoadError::Value(err)
    }
}

/// Check a 7-bit MIDI data byte
pub(crate) fn check_u7(field: &'static str, value: u8) -> Result<u8, ValueError> {
    if value > 127 {
        return Err(ValueError::OutOfRange {
            field,
            value: value as u32,
            max: 127,
        });
    }
    Ok(value)
}
