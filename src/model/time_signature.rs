use crate::error::ValueError;

/// Time signature change at an absolute tick
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
    /// Number of beats per bar (numerator)
    pub numerator: u8,
    /// Note value that gets one beat (denominator: 4 = quarter, 8 = eighth)
    pub denominator: u8,
    /// Tick at which this signature takes effect
    pub tick: u32,
}

impl TimeSignature {
    /// Standard 4/4 time at the start of the piece
    pub const FOUR_FOUR: TimeSignature = TimeSignature {
        numerator: 4,
        denominator: 4,
        tick: 0,
    };

    /// Create a time signature; numerator and denominator must be positive
    pub fn new(numerator: u8, denominator: u8, tick: u32) -> Result<Self, ValueError> {
        if numerator == 0 {
            return Err(ValueError::NotPositive { field: "numerator" });
        }
        if denominator == 0 {
            return Err(ValueError::NotPositive { field: "denominator" });
        }
        Ok(Self {
            numerator,
            denominator,
            tick,
        })
    }

    /// Get the total duration of one bar in ticks
    /// Formula: (numerator / denominator) * (4 * resolution)
    ///        = (numerator * 4 * resolution) / denominator
    pub fn bar_ticks(&self, resolution: u32) -> u32 {
        (self.numerator as u32 * 4 * resolution) / self.denominator as u32
    }

    /// Compound meters group beats in threes (6/8, 9/8, 12/8)
    pub fn is_compound(&self) -> bool {
        self.denominator == 8 && self.numerator > 3 && self.numerator % 3 == 0
    }
}

impl std::fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} at tick {}", self.numerator, self.denominator, self.tick)
    }
}
