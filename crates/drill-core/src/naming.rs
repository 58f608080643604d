//! Enharmonic note naming for computed pitches

use crate::degree::{Accidental, CanonicalDegree};
use crate::pitch::in_midi_range;

pub const SHARP_NOTE_NAMES: [&str; 12] = [
    "C", "C sharp", "D", "D sharp", "E", "F",
    "F sharp", "G", "G sharp", "A", "A sharp", "B",
];

pub const FLAT_NOTE_NAMES: [&str; 12] = [
    "C", "D flat", "D", "E flat", "E", "F",
    "G flat", "G", "A flat", "A", "B flat", "B",
];

pub const UNKNOWN_NOTE: &str = "Unknown note";

/// Which of the two name tables to read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spelling {
    Flat,
    Sharp,
}

impl Spelling {
    pub fn names(&self) -> &'static [&'static str; 12] {
        match self {
            Self::Flat => &FLAT_NOTE_NAMES,
            Self::Sharp => &SHARP_NOTE_NAMES,
        }
    }

    /// Preference implied by the root alone: F, and any root spelled with a
    /// B other than B#, reads in flats.
    pub fn for_root(root_name: &str) -> Self {
        let root = root_name.trim().to_uppercase();
        if root == "F" {
            return Self::Flat;
        }

        if root.contains('B') && !root.contains("B#") {
            Self::Flat
        } else {
            Self::Sharp
        }
    }

    /// The degree's own accidental wins; naturals defer to the root.
    pub fn resolve(root_name: &str, degree_token: &str) -> Self {
        let accidental = CanonicalDegree::parse(degree_token)
            .map(|d| d.accidental)
            .unwrap_or_default();

        match accidental {
            Accidental::Flat => Self::Flat,
            Accidental::Sharp => Self::Sharp,
            Accidental::Natural => Self::for_root(root_name),
        }
    }
}

/// Spoken note name (no octave) for `pitch` under the given root and raw degree token
pub fn note_name(pitch: i32, root_name: &str, degree_token: &str) -> &'static str {
    if !in_midi_range(pitch) {
        return UNKNOWN_NOTE;
    }
    let index = pitch.rem_euclid(12) as usize;
    Spelling::resolve(root_name, degree_token).names()[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_preference_for_natural_degrees() {
        // pitch class 1
        assert_eq!(note_name(61, "F", "3"), "D flat");
        assert_eq!(note_name(61, "C", "3"), "C sharp");
        assert_eq!(note_name(61, "Eb", "6"), "D flat");
        assert_eq!(note_name(61, "bb", "2"), "D flat");
        assert_eq!(note_name(61, "A", "3"), "C sharp");
    }

    #[test]
    fn test_degree_accidental_overrides_root() {
        // pitch class 6
        assert_eq!(note_name(66, "C", "#4"), "F sharp");
        assert_eq!(note_name(66, "C", "b5"), "G flat");
        assert_eq!(note_name(66, "F", "sharp 4"), "F sharp");
        assert_eq!(note_name(66, "G", "flat 5"), "G flat");
    }

    #[test]
    fn test_root_spelling_edge_cases() {
        assert_eq!(Spelling::for_root("B"), Spelling::Flat);
        assert_eq!(Spelling::for_root("B#"), Spelling::Sharp);
        assert_eq!(Spelling::for_root("Cb"), Spelling::Flat);
        assert_eq!(Spelling::for_root("f"), Spelling::Flat);
        assert_eq!(Spelling::for_root("F#"), Spelling::Sharp);
    }

    #[test]
    fn test_root_b_natural_degree_reads_flat() {
        assert_eq!(note_name(73, "B", "2"), "D flat");
        assert_eq!(note_name(73, "B#", "2"), "C sharp");
        assert_eq!(note_name(73, "B", "#1"), "C sharp");
    }

    #[test]
    fn test_out_of_range_pitch() {
        assert_eq!(note_name(128, "C", "1"), UNKNOWN_NOTE);
        assert_eq!(note_name(-1, "C", "1"), UNKNOWN_NOTE);
        assert_eq!(note_name(127, "C", "1"), "G");
        assert_eq!(note_name(0, "C", "1"), "C");
    }
}
