use thiserror::Error;

use crate::models::{EmployeeId, Position};

/// Failure of a move operation issued by the drag-drop coordinator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("employee {0} not found")]
    EmployeeNotFound(EmployeeId),

    #[error("overlay moves require donut mode")]
    DonutModeInactive,

    #[error("employee {employee_id} sits at {grid_position}, outside the donut calibration box")]
    OutsideDonutScope {
        employee_id: EmployeeId,
        grid_position: Position,
    },

    #[error("move rejected: {0}")]
    Rejected(String),
}

/// Failure of the persisted UI-preference store.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference storage failed: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for PreferenceError {
    fn from(e: anyhow::Error) -> Self {
        Self::Storage(format!("{e:#}"))
    }
}
