//! Spray pattern selection

use serde::{Deserialize, Serialize};
use std::fmt;

/// The procedural rule that decides how a deposit lays down paint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprayPattern {
    /// A single round blot
    #[default]
    Normal,
    /// A handful of uneven blots scattered around the point
    Splatter,
    /// A single thin, slightly tilted line
    Thin,
    /// A dense mist of small dots
    Spray,
    /// A field of tiny specks
    Dotted,
    /// Short rotated dashes
    Streak,
}

impl SprayPattern {
    /// Every pattern, in selector order
    pub const ALL: [SprayPattern; 6] = [
        SprayPattern::Normal,
        SprayPattern::Splatter,
        SprayPattern::Thin,
        SprayPattern::Spray,
        SprayPattern::Dotted,
        SprayPattern::Streak,
    ];

    /// Look up a pattern by its selector key.
    ///
    /// Unknown keys fall back to [`SprayPattern::Normal`].
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "splatter" => Self::Splatter,
            "thin" => Self::Thin,
            "spray" => Self::Spray,
            "dotted" => Self::Dotted,
            "streak" => Self::Streak,
            _ => Self::Normal,
        }
    }

    /// Selector key for this pattern
    pub fn key(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Splatter => "splatter",
            Self::Thin => "thin",
            Self::Spray => "spray",
            Self::Dotted => "dotted",
            Self::Streak => "streak",
        }
    }

    /// The pattern after this one, wrapping around
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SprayPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for pattern in SprayPattern::ALL {
            assert_eq!(SprayPattern::from_key(pattern.key()), pattern);
        }
    }

    #[test]
    fn test_unknown_key_falls_back_to_normal() {
        assert_eq!(SprayPattern::from_key("zigzag"), SprayPattern::Normal);
        assert_eq!(SprayPattern::from_key(""), SprayPattern::Normal);
    }

    #[test]
    fn test_key_lookup_ignores_case_and_whitespace() {
        assert_eq!(SprayPattern::from_key(" Splatter "), SprayPattern::Splatter);
    }

    #[test]
    fn test_next_cycles() {
        assert_eq!(SprayPattern::Normal.next(), SprayPattern::Splatter);
        assert_eq!(SprayPattern::Streak.next(), SprayPattern::Normal);
    }
}
