// Purpose - the in-memory music representation

pub mod document;
pub mod instrument;
pub mod meta;
pub mod note;
pub mod program;
pub mod time_signature;

pub use document::{Loaded, MidiDocument};
pub use instrument::Instrument;
pub use meta::{KeySignature, TempoChange, DEFAULT_TEMPO};
pub use note::Note;
pub use program::{CoarseFamily, Family};
pub use time_signature::TimeSignature;
