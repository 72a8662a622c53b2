//! Collaborators the engine drives but does not implement.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::error::MoveError;
use crate::models::{Employee, EmployeeId, Level, Position};

/// Owner of the employee collection: supplies the visible grid and applies moves.
///
/// The engine never mutates employees itself. A move only becomes visible once
/// the provider has applied it.
#[async_trait]
pub trait EmployeeProvider: Send + Sync {
    /// Visible employees per box, already filtered for donut mode.
    fn employees_by_position(&self) -> BTreeMap<Position, Vec<Employee>>;

    fn short_label(&self, position: Position) -> String {
        position.short_label()
    }

    /// Change `grid_position`, the authoritative placement.
    async fn move_permanent(
        &self,
        employee_id: EmployeeId,
        performance: Level,
        potential: Level,
    ) -> Result<(), MoveError>;

    /// Change only `donut_position`, leaving `grid_position` untouched.
    async fn move_overlay(
        &self,
        employee_id: EmployeeId,
        performance: Level,
        potential: Level,
    ) -> Result<(), MoveError>;

    fn select_employee(&self, employee_id: EmployeeId);
}

/// Source of the donut mode flag. Toggling lives with whoever implements this.
pub trait DonutModeFlag: Send + Sync {
    fn donut_mode_active(&self) -> bool;
}
