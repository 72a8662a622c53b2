use std::fmt;

use serde::{Deserialize, Serialize};

use super::position::Position;

/// Stable identity of an employee, as assigned by the data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An employee placed on the calibration grid.
///
/// `grid_position` is authoritative. The session markers
/// (`original_grid_position`, `modified_in_session`) and the donut overlay
/// fields are owned by the data provider; the engine only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub job_title: Option<String>,
    pub grid_position: Position,
    /// Frozen on the first permanent move of the session, never overwritten.
    #[serde(default)]
    pub original_grid_position: Option<Position>,
    #[serde(default)]
    pub modified_in_session: bool,
    /// What-if position, only meaningful while donut mode is active.
    #[serde(default)]
    pub donut_position: Option<Position>,
    #[serde(default)]
    pub donut_modified: bool,
}

impl Employee {
    pub fn new(employee_id: EmployeeId, name: impl Into<String>, grid_position: Position) -> Self {
        Self {
            employee_id,
            name: name.into(),
            job_title: None,
            grid_position,
            original_grid_position: None,
            modified_in_session: false,
            donut_position: None,
            donut_modified: false,
        }
    }

    /// Where the employee is drawn: the overlay position in donut mode if one
    /// has been set, otherwise the permanent one.
    pub fn current_position(&self, donut_mode: bool) -> Position {
        if donut_mode {
            self.donut_position.unwrap_or(self.grid_position)
        } else {
            self.grid_position
        }
    }
}
