pub mod advisory; // Recoverable problems reported while loading or writing
pub mod emit; // Document -> multi-track event stream
pub mod error;
pub mod io;
pub mod model; // Notes, instruments and meta events
pub mod options;
pub mod rescale; // Tick resolution changes
pub mod resolve; // Note pairing and instrument assignment
pub mod roll;
pub mod timeline; // Absolute-time view of an event stream

pub use advisory::{Advisories, Advisory};
pub use error::{LoadError, ValueError};
pub use model::{Instrument, Loaded, MidiDocument, Note};
pub use options::LoadOptions;
pub use roll::PianoRoll;

/// General MIDI percussion channel (10th channel, zero-based)
pub const DRUM_CHANNEL: u8 = 9;
