//! Scale-degree to semitone lookup

use crate::degree::{Accidental, CanonicalDegree};

/// Immutable degree -> semitone table.
///
/// Enharmonic pairs such as `#4`/`B5` are separate degrees that resolve to the
/// same offset. Extended degrees (9, 11, 13) reach past the octave and can be
/// switched off, in which case they look up as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTable {
    extended: bool,
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self { extended: true }
    }
}

impl IntervalTable {
    pub fn new(extended: bool) -> Self {
        Self { extended }
    }

    /// Semitones above the root for a parsed degree
    pub fn semitones(&self, degree: CanonicalDegree) -> Option<u8> {
        use Accidental::*;

        let diatonic = match (degree.accidental, degree.numeral) {
            (Natural, 1) => Some(0),
            (Flat, 2) => Some(1),
            (Natural, 2) => Some(2),
            (Flat, 3) => Some(3),
            (Natural, 3) => Some(4),
            (Natural, 4) => Some(5),
            (Flat, 5) | (Sharp, 4) => Some(6),
            (Natural, 5) => Some(7),
            (Flat, 6) | (Sharp, 5) => Some(8),
            (Natural, 6) => Some(9),
            (Flat, 7) => Some(10),
            (Natural, 7) => Some(11),
            _ => None,
        };
        if diatonic.is_some() || !self.extended {
            return diatonic;
        }

        match (degree.accidental, degree.numeral) {
            (Flat, 9) => Some(13),
            (Natural, 9) => Some(14),
            (Sharp, 9) => Some(15),
            (Natural, 11) => Some(17),
            (Sharp, 11) => Some(18),
            (Flat, 13) => Some(20),
            (Natural, 13) => Some(21),
            _ => None,
        }
    }

    /// Semitones for canonical token text (`"B3"`, `"#11"`)
    pub fn lookup(&self, canonical: &str) -> Option<u8> {
        CanonicalDegree::from_normalized(canonical).and_then(|d| self.semitones(d))
    }
}
