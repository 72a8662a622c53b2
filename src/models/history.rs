use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::employee::EmployeeId;
use super::position::Position;

/// Which field a move changed.
///
/// - `Permanent`: `grid_position`, the authoritative placement
/// - `Overlay`: `donut_position`, the reversible what-if placement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Permanent,
    Overlay,
}

/// Append-only record of a move the data provider applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: Uuid,
    pub employee_id: EmployeeId,
    pub kind: MoveKind,
    pub from: Position,
    pub to: Position,
    pub moved_at: DateTime<Utc>,
}
