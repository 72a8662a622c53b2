//! Bidirectional mapping between grid positions and level pairs.
//!
//! The layout is fixed. Columns run low to high performance, rows run high to
//! low potential from the top:
//!
//! ```text
//! 7 (L,H)  8 (M,H)  9 (H,H)
//! 4 (L,M)  5 (M,M)  6 (H,M)
//! 1 (L,L)  2 (M,L)  3 (H,L)
//! ```

use serde::{Deserialize, Serialize};

use crate::models::{Level, Levels, Position};

/// Display coordinates of a box: `row` 0 is the top (high potential) row,
/// `col` 0 is the left (low performance) column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCol {
    pub row: usize,
    pub col: usize,
}

/// Stateless translation between [`Position`] and [`Levels`].
pub struct PositionMapper;

impl PositionMapper {
    pub fn position_to_levels(position: Position) -> Levels {
        let index = position.get() - 1;
        let performance = Level::from_ordinal(index % 3);
        let potential = Level::from_ordinal(index / 3);
        match (performance, potential) {
            (Some(performance), Some(potential)) => Levels::new(performance, potential),
            _ => unreachable!("position {position} is outside the 3x3 grid"),
        }
    }

    pub fn levels_to_position(performance: Level, potential: Level) -> Position {
        let raw = potential.ordinal() * 3 + performance.ordinal() + 1;
        match Position::new(i64::from(raw)) {
            Some(position) => position,
            None => unreachable!("level pair produced position {raw}"),
        }
    }

    /// `"<performance letter>,<potential letter>"`, e.g. `"H,H"` for box 9.
    pub fn short_label(position: Position) -> String {
        let levels = Self::position_to_levels(position);
        format!(
            "{},{}",
            levels.performance.letter(),
            levels.potential.letter()
        )
    }

    pub fn row_col_of(position: Position) -> RowCol {
        let levels = Self::position_to_levels(position);
        RowCol {
            row: 2 - usize::from(levels.potential.ordinal()),
            col: usize::from(levels.performance.ordinal()),
        }
    }

    /// Inverse of [`row_col_of`](Self::row_col_of). `None` outside the 3x3 range.
    pub fn position_at(row: usize, col: usize) -> Option<Position> {
        if row > 2 || col > 2 {
            return None;
        }
        let potential = Level::from_ordinal((2 - row) as u8)?;
        let performance = Level::from_ordinal(col as u8)?;
        Some(Self::levels_to_position(performance, potential))
    }
}
