//! Round numbering - the closed set of competition rounds

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three competition rounds
///
/// Stored on disk as the plain integer `1`, `2` or `3`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum RoundNumber {
    #[default]
    One,
    Two,
    Three,
}

impl RoundNumber {
    pub fn all() -> [RoundNumber; 3] {
        [RoundNumber::One, RoundNumber::Two, RoundNumber::Three]
    }

    pub fn number(self) -> u8 {
        match self {
            RoundNumber::One => 1,
            RoundNumber::Two => 2,
            RoundNumber::Three => 3,
        }
    }

    /// Display name of the round
    pub fn name(self) -> &'static str {
        match self {
            RoundNumber::One => "Style Battle",
            RoundNumber::Two => "Design Remix",
            RoundNumber::Three => "UXcellence Grand Showdown",
        }
    }

    /// Shorter name used in the round tabs
    pub fn tab_name(self) -> &'static str {
        match self {
            RoundNumber::One => "Style Battle",
            RoundNumber::Two => "Design Remix",
            RoundNumber::Three => "Grand Showdown",
        }
    }

    /// "Round 2: Design Remix"
    pub fn label(self) -> String {
        format!("Round {}: {}", self.number(), self.name())
    }

    pub fn next(self) -> RoundNumber {
        match self {
            RoundNumber::One => RoundNumber::Two,
            RoundNumber::Two => RoundNumber::Three,
            RoundNumber::Three => RoundNumber::One,
        }
    }

    pub fn prev(self) -> RoundNumber {
        match self {
            RoundNumber::One => RoundNumber::Three,
            RoundNumber::Two => RoundNumber::One,
            RoundNumber::Three => RoundNumber::Two,
        }
    }

    /// Position in the tab bar
    pub fn index(self) -> usize {
        self.number() as usize - 1
    }
}

impl fmt::Display for RoundNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl From<RoundNumber> for u8 {
    fn from(round: RoundNumber) -> u8 {
        round.number()
    }
}

/// Integer outside the 1..=3 round range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRound(pub u8);

impl fmt::Display for InvalidRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round must be 1, 2 or 3 (got {})", self.0)
    }
}

impl std::error::Error for InvalidRound {}

impl TryFrom<u8> for RoundNumber {
    type Error = InvalidRound;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RoundNumber::One),
            2 => Ok(RoundNumber::Two),
            3 => Ok(RoundNumber::Three),
            other => Err(InvalidRound(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_names() {
        assert_eq!(RoundNumber::One.name(), "Style Battle");
        assert_eq!(RoundNumber::Two.name(), "Design Remix");
        assert_eq!(RoundNumber::Three.name(), "UXcellence Grand Showdown");
        assert_eq!(RoundNumber::Three.tab_name(), "Grand Showdown");
        assert_eq!(RoundNumber::Two.label(), "Round 2: Design Remix");
    }

    #[test]
    fn test_round_try_from() {
        assert_eq!(RoundNumber::try_from(1), Ok(RoundNumber::One));
        assert_eq!(RoundNumber::try_from(3), Ok(RoundNumber::Three));
        assert_eq!(RoundNumber::try_from(0), Err(InvalidRound(0)));
        assert_eq!(RoundNumber::try_from(4), Err(InvalidRound(4)));
    }

    #[test]
    fn test_round_cycle() {
        for round in RoundNumber::all() {
            assert_eq!(round.next().prev(), round);
        }
        assert_eq!(RoundNumber::Three.next(), RoundNumber::One);
        assert_eq!(RoundNumber::One.prev(), RoundNumber::Three);
    }

    #[test]
    fn test_round_serde_as_integer() {
        let json = serde_json::to_string(&RoundNumber::Two).unwrap();
        assert_eq!(json, "2");
        let parsed: RoundNumber = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, RoundNumber::Three);
        assert!(serde_json::from_str::<RoundNumber>("7").is_err());
    }
}
