//! Scale-degree tokens: normalization, parsing and spoken rendering

use std::fmt;

/// Explicit accidental carried by a degree token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Flat,
    Sharp,
}

impl Accidental {
    /// Marker used in canonical token text
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Natural => "",
            Self::Flat => "B",
            Self::Sharp => "#",
        }
    }

    /// Word used when the degree is spoken
    pub fn spoken(&self) -> &'static str {
        match self {
            Self::Natural => "",
            Self::Flat => "flat ",
            Self::Sharp => "sharp ",
        }
    }
}

/// Parsed form of a normalized degree token (e.g. `B3` -> flat 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalDegree {
    pub accidental: Accidental,
    pub numeral: u8,
}

impl CanonicalDegree {
    pub fn new(accidental: Accidental, numeral: u8) -> Self {
        Self { accidental, numeral }
    }

    /// Parse a raw token by normalizing it first.
    ///
    /// Returns `None` when the token is not an optional accidental followed by
    /// a numeral. Whether the numeral is a known degree is the interval
    /// table's call.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::from_normalized(&normalize(raw))
    }

    /// Parse text that is already in canonical form
    pub fn from_normalized(canonical: &str) -> Option<Self> {
        let (accidental, digits) = if let Some(rest) = canonical.strip_prefix('B') {
            (Accidental::Flat, rest)
        } else if let Some(rest) = canonical.strip_prefix('#') {
            (Accidental::Sharp, rest)
        } else {
            (Accidental::Natural, canonical)
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let numeral = digits.parse().ok()?;
        Some(Self { accidental, numeral })
    }
}

impl fmt::Display for CanonicalDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.accidental.marker(), self.numeral)
    }
}

/// Canonicalize heterogeneous degree text (`"flat 3"` -> `"B3"`, `"#11"` -> `"#11"`).
///
/// Unrecognized text comes back in the same shape (trimmed, spaces removed,
/// upper-cased) so the caller can still report it. Idempotent.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let replaced = lowered
        .replace("flat ", "b")
        .replace("flat", "b")
        .replace("sharp ", "#")
        .replace("sharp", "#");

    replaced
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Human-readable rendering of a raw token (`"b3"` -> `"flat 3"`, `"#11"` -> `"sharp 11"`)
pub fn spoken_degree(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();

    let (accidental, rest) = if let Some(rest) = lowered.strip_prefix("flat") {
        (Accidental::Flat, rest)
    } else if let Some(rest) = lowered.strip_prefix('b') {
        (Accidental::Flat, rest)
    } else if let Some(rest) = lowered.strip_prefix("sharp") {
        (Accidental::Sharp, rest)
    } else if let Some(rest) = lowered.strip_prefix('#') {
        (Accidental::Sharp, rest)
    } else {
        (Accidental::Natural, lowered.as_str())
    };

    format!("{}{}", accidental.spoken(), rest.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_spellings() {
        assert_eq!(normalize("b3"), "B3");
        assert_eq!(normalize("flat 3"), "B3");
        assert_eq!(normalize("  Flat3 "), "B3");
        assert_eq!(normalize("sharp 11"), "#11");
        assert_eq!(normalize("#4"), "#4");
        assert_eq!(normalize("5"), "5");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["1", "b3", "flat 3", "sharp 4", "#11", "B13", "9", "bogus", " sharp  5 "] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_unrecognized_token_is_preserved() {
        assert_eq!(normalize("xyz"), "XYZ");
        assert_eq!(CanonicalDegree::parse("xyz"), None);
        assert_eq!(CanonicalDegree::parse(""), None);
        assert_eq!(CanonicalDegree::parse("flat"), None);
    }

    #[test]
    fn test_parse_tagged_value() {
        assert_eq!(CanonicalDegree::parse("flat 7"), Some(CanonicalDegree::new(Accidental::Flat, 7)));
        assert_eq!(CanonicalDegree::parse("#11"), Some(CanonicalDegree::new(Accidental::Sharp, 11)));
        assert_eq!(CanonicalDegree::parse("5"), Some(CanonicalDegree::new(Accidental::Natural, 5)));
        assert_eq!(CanonicalDegree::new(Accidental::Flat, 3).to_string(), "B3");
    }

    #[test]
    fn test_spoken_degree() {
        assert_eq!(spoken_degree("b3"), "flat 3");
        assert_eq!(spoken_degree("flat 9"), "flat 9");
        assert_eq!(spoken_degree("#11"), "sharp 11");
        assert_eq!(spoken_degree("sharp 4"), "sharp 4");
        assert_eq!(spoken_degree(" 7 "), "7");
    }
}
