use serde::{Deserialize, Serialize};

/// A rating on one of the two calibration axes (performance or potential).
///
/// The ordinal is what places a level on the grid: `Low = 0`, `Medium = 1`,
/// `High = 2`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Level; 3] = [Level::Low, Level::Medium, Level::High];

    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            _ => None,
        }
    }

    /// Single-letter form used in short box labels.
    pub fn letter(&self) -> char {
        match self {
            Self::Low => 'L',
            Self::Medium => 'M',
            Self::High => 'H',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// A (performance, potential) pair. Every pair maps to exactly one grid position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Levels {
    pub performance: Level,
    pub potential: Level,
}

impl Levels {
    pub fn new(performance: Level, potential: Level) -> Self {
        Self {
            performance,
            potential,
        }
    }
}
