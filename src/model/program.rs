/*
General MIDI program families
=============================

The 128 General MIDI programs come in 16 blocks of 8 related timbres.
`Family` names those blocks; `CoarseFamily` folds them further into five
groups that are useful when training on or reducing multi-instrument music:

  Piano     = Piano, Chromatic Percussion
  Guitar    = Guitar
  Bass      = Bass
  Ensemble  = Organ, Strings, Ensemble, Brass, Reed, Pipe,
              Synth Lead, Synth Pad, Ethnic
  (none)    = Synth Effects, Percussive, Sound Effects
*/

/// One of the 16 General MIDI instrument families
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Piano,
    ChromaticPercussion,
    Organ,
    Guitar,
    Bass,
    Strings,
    Ensemble,
    Brass,
    Reed,
    Pipe,
    SynthLead,
    SynthPad,
    SynthEffects,
    Ethnic,
    Percussive,
    SoundEffects,
}

impl Family {
    const ALL: [Family; 16] = [
        Family::Piano,
        Family::ChromaticPercussion,
        Family::Organ,
        Family::Guitar,
        Family::Bass,
        Family::Strings,
        Family::Ensemble,
        Family::Brass,
        Family::Reed,
        Family::Pipe,
        Family::SynthLead,
        Family::SynthPad,
        Family::SynthEffects,
        Family::Ethnic,
        Family::Percussive,
        Family::SoundEffects,
    ];

    /// Family of a program number; `None` above 127
    pub fn of_program(program: u8) -> Option<Family> {
        Self::ALL.get(program as usize / 8).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Family::Piano => "Piano",
            Family::ChromaticPercussion => "Chromatic Percussion",
            Family::Organ => "Organ",
            Family::Guitar => "Guitar",
            Family::Bass => "Bass",
            Family::Strings => "Strings",
            Family::Ensemble => "Ensemble",
            Family::Brass => "Brass",
            Family::Reed => "Reed",
            Family::Pipe => "Pipe",
            Family::SynthLead => "Synth Lead",
            Family::SynthPad => "Synth Pad",
            Family::SynthEffects => "Synth Effects",
            Family::Ethnic => "Ethnic",
            Family::Percussive => "Percussive",
            Family::SoundEffects => "Sound Effects",
        }
    }

    /// Five-way grouping; effects and percussive families have none
    pub fn coarse(&self) -> Option<CoarseFamily> {
        match self {
            Family::Piano | Family::ChromaticPercussion => Some(CoarseFamily::Piano),
            Family::Guitar => Some(CoarseFamily::Guitar),
            Family::Bass => Some(CoarseFamily::Bass),
            Family::Organ
            | Family::Strings
            | Family::Ensemble
            | Family::SynthLead
            | Family::SynthPad
            | Family::Brass
            | Family::Reed
            | Family::Pipe
            | Family::Ethnic => Some(CoarseFamily::Ensemble),
            Family::SynthEffects | Family::Percussive | Family::SoundEffects => None,
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Reduced instrument classes
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoarseFamily {
    Piano,
    Guitar,
    Bass,
    Ensemble,
}

impl CoarseFamily {
    pub fn of_program(program: u8) -> Option<CoarseFamily> {
        Family::of_program(program).and_then(|family| family.coarse())
    }

    /// Representative program: 0 (piano), 24 (nylon guitar), 32 (acoustic bass), 40 (violin)
    pub fn program(&self) -> u8 {
        match self {
            CoarseFamily::Piano => 0,
            CoarseFamily::Guitar => 24,
            CoarseFamily::Bass => 32,
            CoarseFamily::Ensemble => 40,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_boundaries() {
        assert_eq!(Family::of_program(0), Some(Family::Piano));
        assert_eq!(Family::of_program(7), Some(Family::Piano));
        assert_eq!(Family::of_program(8), Some(Family::ChromaticPercussion));
        assert_eq!(Family::of_program(40), Some(Family::Strings));
        assert_eq!(Family::of_program(127), Some(Family::SoundEffects));
        assert_eq!(Family::of_program(128), None);
    }

    #[test]
    fn test_coarse_grouping() {
        assert_eq!(CoarseFamily::of_program(10), Some(CoarseFamily::Piano));
        assert_eq!(CoarseFamily::of_program(25), Some(CoarseFamily::Guitar));
        assert_eq!(CoarseFamily::of_program(33), Some(CoarseFamily::Bass));
        assert_eq!(CoarseFamily::of_program(81), Some(CoarseFamily::Ensemble));
        assert_eq!(CoarseFamily::of_program(100), None);
        assert_eq!(CoarseFamily::of_program(118), None);
    }

    #[test]
    fn test_coarse_program_round_trips() {
        for coarse in [
            CoarseFamily::Piano,
            CoarseFamily::Guitar,
            CoarseFamily::Bass,
            CoarseFamily::Ensemble,
        ] {
            assert_eq!(CoarseFamily::of_program(coarse.program()), Some(coarse));
        }
    }
}
