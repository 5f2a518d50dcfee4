// Purpose - external interfaces, format conversions

#[cfg(feature = "smf")]
pub mod converter;
pub mod midi;
