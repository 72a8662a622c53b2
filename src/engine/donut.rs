use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::provider::DonutModeFlag;
use crate::models::{Employee, Position};

/// Which move contract a committed drop must call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOperation {
    Permanent,
    Overlay,
}

/// Read-only view of donut mode and the rules that hang off it.
#[derive(Clone)]
pub struct DonutModeGate {
    flag: Arc<dyn DonutModeFlag>,
}

impl DonutModeGate {
    /// The only box calibrated in donut mode.
    pub const CALIBRATION_POSITION: Position = Position::CENTER;

    pub fn new(flag: Arc<dyn DonutModeFlag>) -> Self {
        Self { flag }
    }

    pub fn is_active(&self) -> bool {
        self.flag.donut_mode_active()
    }

    pub fn select_move_operation(&self) -> MoveOperation {
        if self.is_active() {
            MoveOperation::Overlay
        } else {
            MoveOperation::Permanent
        }
    }

    /// Position a drop is compared against to detect a no-op.
    pub fn current_position(&self, employee: &Employee) -> Position {
        employee.current_position(self.is_active())
    }

    pub fn is_visible(&self, employee: &Employee) -> bool {
        Self::visible_in(self.is_active(), employee)
    }

    /// In donut mode only employees permanently in the calibration box are shown.
    /// Same rule as [`is_visible`](Self::is_visible), for callers already holding the flag.
    pub fn visible_in(donut_mode: bool, employee: &Employee) -> bool {
        !donut_mode || employee.grid_position == Self::CALIBRATION_POSITION
    }
}
