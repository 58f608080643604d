//! Root/key resolution and per-root activation

use std::collections::BTreeMap;

use crate::error::{DrillError, Result};

/// Accepted root spellings and their semitone offset above C
pub const PITCH_CLASSES: [(&str, u8); 21] = [
    ("C", 0), ("B#", 0), ("C#", 1), ("DB", 1), ("D", 2), ("D#", 3), ("EB", 3),
    ("E", 4), ("FB", 4), ("F", 5), ("E#", 5), ("F#", 6), ("GB", 6), ("G", 7),
    ("G#", 8), ("AB", 8), ("A", 9), ("A#", 10), ("BB", 10), ("B", 11), ("CB", 11),
];

/// Semitone offset of a root name from C, case-insensitive
pub fn semitone_offset(name: &str) -> Option<u8> {
    let upper = name.trim().to_uppercase();
    PITCH_CLASSES
        .iter()
        .find(|(spelling, _)| *spelling == upper)
        .map(|&(_, offset)| offset)
}

/// Comma-separated list of accepted spellings, for error messages
pub fn valid_root_names() -> String {
    PITCH_CLASSES
        .iter()
        .map(|(spelling, _)| *spelling)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fail on the first root that is not a recognized pitch class
pub fn validate_roots(roots: &[String]) -> Result<()> {
    if roots.is_empty() {
        return Err(DrillError::NoRoots);
    }
    for name in roots {
        if semitone_offset(name).is_none() {
            return Err(DrillError::UnknownRoot {
                name: name.clone(),
                valid: valid_root_names(),
            });
        }
    }
    Ok(())
}

/// Play counts for the active root, keyed by the raw degree token
pub type PlayCounts = BTreeMap<String, u32>;

/// A resolved root for one rotation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootContext {
    /// Name as the user typed it (used for announcements and spelling)
    pub name: String,
    pub offset: u8,
    pub octave: i32,
    /// `12 * (octave + 1) + offset`, so C4 = 60
    pub pitch: i32,
}

impl RootContext {
    pub fn resolve(name: &str, octave: i32) -> Result<Self> {
        let offset = semitone_offset(name).ok_or_else(|| DrillError::UnknownRoot {
            name: name.to_string(),
            valid: valid_root_names(),
        })?;

        Ok(Self {
            name: name.to_string(),
            offset,
            octave,
            pitch: 12 * (octave + 1) + offset as i32,
        })
    }

    /// Text spoken when this root becomes active
    pub fn announcement(&self) -> String {
        format!("New Root Note: {}", self.name)
    }
}

/// Resolve every root in rotation order, failing on the first unknown name
pub fn resolve_all(names: &[String], octave: i32) -> Result<Vec<RootContext>> {
    validate_roots(names)?;
    names.iter().map(|n| RootContext::resolve(n, octave)).collect()
}

/// A fresh count table with one zero entry per token
pub fn zeroed_counts<'a>(tokens: impl IntoIterator<Item = &'a String>) -> PlayCounts {
    tokens.into_iter().map(|t| (t.clone(), 0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_middle_c() {
        let root = RootContext::resolve("C", 4).unwrap();
        assert_eq!(root.pitch, 60);
        assert_eq!(root.offset, 0);
    }

    #[test]
    fn test_resolve_aliases_case_insensitive() {
        assert_eq!(RootContext::resolve("db", 4).unwrap().pitch, 61);
        assert_eq!(RootContext::resolve("C#", 4).unwrap().pitch, 61);
        assert_eq!(RootContext::resolve("Bb", 3).unwrap().pitch, 58);
        assert_eq!(RootContext::resolve("A", 4).unwrap().pitch, 69);
        // B# and Cb stay in the written octave
        assert_eq!(RootContext::resolve("B#", 4).unwrap().pitch, 60);
        assert_eq!(RootContext::resolve("Cb", 4).unwrap().pitch, 71);
    }

    #[test]
    fn test_name_case_is_preserved() {
        let root = RootContext::resolve("eb", 4).unwrap();
        assert_eq!(root.name, "eb");
        assert_eq!(root.announcement(), "New Root Note: eb");
    }

    #[test]
    fn test_unknown_root() {
        let err = RootContext::resolve("H", 4).unwrap_err();
        assert!(matches!(err, DrillError::UnknownRoot { ref name, .. } if name == "H"));
        assert!(err.to_string().contains("CB"));
    }

    #[test]
    fn test_validate_roots() {
        assert!(validate_roots(&["C".into(), "f#".into()]).is_ok());
        assert!(matches!(validate_roots(&[]), Err(DrillError::NoRoots)));
        assert!(matches!(
            validate_roots(&["C".into(), "X".into()]),
            Err(DrillError::UnknownRoot { .. })
        ));
    }

    #[test]
    fn test_resolve_all_keeps_order() {
        let names = vec!["G".to_string(), "c".to_string()];
        let roots = resolve_all(&names, 3).unwrap();
        assert_eq!(roots.iter().map(|r| r.pitch).collect::<Vec<_>>(), vec![55, 48]);
        assert!(resolve_all(&["Q".to_string()], 4).is_err());
    }

    #[test]
    fn test_zeroed_counts() {
        let tokens = vec!["1".to_string(), "b3".to_string(), "5".to_string()];
        let counts = zeroed_counts(&tokens);
        assert_eq!(counts.len(), 3);
        assert!(counts.values().all(|&c| c == 0));
    }
}
