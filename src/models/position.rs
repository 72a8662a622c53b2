use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::level::Levels;
use crate::engine::PositionMapper;

/// Raised when a raw value does not name one of the nine boxes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPosition {
    #[error("grid position must be between 1 and 9, got {0}")]
    OutOfRange(i64),

    #[error("grid position must be an integer, got {0:?}")]
    NotAnInteger(String),
}

/// One of the nine grid boxes, numbered 1..=9.
///
/// This is the only value persisted to say where an employee sits. The range
/// is closed, so a `Position` is valid by construction and every mapping over
/// it is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Position(u8);

impl Position {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    /// Medium performance / medium potential. Donut mode calibrates this box.
    pub const CENTER: Position = Position(5);

    /// All nine positions in ascending order.
    pub const ALL: [Position; 9] = [
        Position(1),
        Position(2),
        Position(3),
        Position(4),
        Position(5),
        Position(6),
        Position(7),
        Position(8),
        Position(9),
    ];

    pub fn new(raw: i64) -> Option<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&raw) {
            Some(Self(raw as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn levels(self) -> Levels {
        PositionMapper::position_to_levels(self)
    }

    pub fn short_label(self) -> String {
        PositionMapper::short_label(self)
    }
}

impl TryFrom<u8> for Position {
    type Error = InvalidPosition;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(i64::from(raw)).ok_or(InvalidPosition::OutOfRange(i64::from(raw)))
    }
}

impl TryFrom<i64> for Position {
    type Error = InvalidPosition;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(InvalidPosition::OutOfRange(raw))
    }
}

impl From<Position> for u8 {
    fn from(position: Position) -> Self {
        position.0
    }
}

impl FromStr for Position {
    type Err = InvalidPosition;

    /// Parses the persisted integer form. Anything that is not a plain
    /// integer in range is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s
            .trim()
            .parse()
            .map_err(|_| InvalidPosition::NotAnInteger(s.to_string()))?;
        Self::try_from(raw)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_integers() {
        assert_eq!(Position::new(0), None);
        assert_eq!(Position::new(10), None);
        assert_eq!(Position::new(-3), None);
        assert_eq!(Position::try_from(12u8), Err(InvalidPosition::OutOfRange(12)));
    }

    #[test]
    fn parses_persisted_strings() {
        assert_eq!("7".parse::<Position>(), Ok(Position::ALL[6]));
        assert_eq!(
            "abc".parse::<Position>(),
            Err(InvalidPosition::NotAnInteger("abc".to_string()))
        );
        assert_eq!("10".parse::<Position>(), Err(InvalidPosition::OutOfRange(10)));
        assert!("4.5".parse::<Position>().is_err());
    }

    #[test]
    fn parse_errors_name_the_raw_value() {
        let err = "abc".parse::<Position>().unwrap_err();
        assert_eq!(err.to_string(), "grid position must be an integer, got \"abc\"");
        let err = "0".parse::<Position>().unwrap_err();
        assert_eq!(err.to_string(), "grid position must be between 1 and 9, got 0");
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&Position::CENTER).unwrap();
        assert_eq!(json, "5");
        let back: Position = serde_json::from_str("9").unwrap();
        assert_eq!(back.get(), 9);
        assert!(serde_json::from_str::<Position>("0").is_err());
    }
}
