//! In-memory employee data provider.
//!
//! [`Roster`] owns the employee collection for a calibration session and
//! applies moves the engine requests. Clones share the same collection.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::engine::{DonutModeFlag, DonutModeGate, EmployeeProvider, MoveError, PositionMapper};
use crate::models::*;

#[derive(Debug, Default)]
struct RosterInner {
    employees: BTreeMap<EmployeeId, Employee>,
    donut_mode: bool,
    selected: Option<EmployeeId>,
    history: Vec<MoveRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    inner: Arc<Mutex<RosterInner>>,
}

impl Roster {
    pub fn new(employees: impl IntoIterator<Item = Employee>) -> Self {
        let employees = employees
            .into_iter()
            .map(|e| (e.employee_id, e))
            .collect();
        Self {
            inner: Arc::new(Mutex::new(RosterInner {
                employees,
                ..RosterInner::default()
            })),
        }
    }

    /// Parse a JSON array of employees.
    pub fn from_json(json: &str) -> Result<Self> {
        let employees: Vec<Employee> =
            serde_json::from_str(json).context("Failed to parse roster")?;
        Ok(Self::new(employees))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster {}", path.display()))?;
        Self::from_json(&content)
    }

    fn lock(&self) -> MutexGuard<'_, RosterInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// A gate reading this roster's donut flag.
    pub fn gate(&self) -> DonutModeGate {
        DonutModeGate::new(Arc::new(self.clone()))
    }

    pub fn get(&self, employee_id: EmployeeId) -> Option<Employee> {
        self.lock().employees.get(&employee_id).cloned()
    }

    pub fn all(&self) -> Vec<Employee> {
        self.lock().employees.values().cloned().collect()
    }

    pub fn set_donut_mode(&self, active: bool) {
        let mut inner = self.lock();
        if inner.donut_mode != active {
            debug!(active, "donut mode toggled");
        }
        inner.donut_mode = active;
    }

    pub fn selected(&self) -> Option<EmployeeId> {
        self.lock().selected
    }

    pub fn history(&self) -> Vec<MoveRecord> {
        self.lock().history.clone()
    }

    pub fn modified_employees(&self) -> Vec<Employee> {
        self.lock()
            .employees
            .values()
            .filter(|e| e.modified_in_session || e.donut_modified)
            .cloned()
            .collect()
    }

    /// Start a new calibration session: current placements become the baseline.
    pub fn reset_session(&self) {
        let mut inner = self.lock();
        for employee in inner.employees.values_mut() {
            employee.original_grid_position = None;
            employee.modified_in_session = false;
            employee.donut_position = None;
            employee.donut_modified = false;
        }
        inner.history.clear();
    }
}

impl RosterInner {
    fn record(&mut self, employee_id: EmployeeId, kind: MoveKind, from: Position, to: Position) {
        self.history.push(MoveRecord {
            id: Uuid::new_v4(),
            employee_id,
            kind,
            from,
            to,
            moved_at: Utc::now(),
        });
    }
}

impl DonutModeFlag for Roster {
    fn donut_mode_active(&self) -> bool {
        self.lock().donut_mode
    }
}

#[async_trait]
impl EmployeeProvider for Roster {
    fn employees_by_position(&self) -> BTreeMap<Position, Vec<Employee>> {
        let inner = self.lock();
        let donut_mode = inner.donut_mode;
        let mut grid: BTreeMap<Position, Vec<Employee>> =
            Position::ALL.iter().map(|p| (*p, Vec::new())).collect();

        for employee in inner.employees.values() {
            if !DonutModeGate::visible_in(donut_mode, employee) {
                continue;
            }
            grid.entry(employee.current_position(donut_mode))
                .or_default()
                .push(employee.clone());
        }
        for employees in grid.values_mut() {
            employees.sort_by(|a, b| {
                a.name
                    .cmp(&b.name)
                    .then(a.employee_id.cmp(&b.employee_id))
            });
        }
        grid
    }

    async fn move_permanent(
        &self,
        employee_id: EmployeeId,
        performance: Level,
        potential: Level,
    ) -> Result<(), MoveError> {
        let to = PositionMapper::levels_to_position(performance, potential);
        let mut inner = self.lock();
        let employee = inner
            .employees
            .get_mut(&employee_id)
            .ok_or(MoveError::EmployeeNotFound(employee_id))?;

        let from = employee.grid_position;
        if from == to {
            return Ok(());
        }
        if employee.original_grid_position.is_none() {
            employee.original_grid_position = Some(from);
        }
        employee.grid_position = to;
        employee.modified_in_session = true;

        inner.record(employee_id, MoveKind::Permanent, from, to);
        Ok(())
    }

    async fn move_overlay(
        &self,
        employee_id: EmployeeId,
        performance: Level,
        potential: Level,
    ) -> Result<(), MoveError> {
        let to = PositionMapper::levels_to_position(performance, potential);
        let mut inner = self.lock();
        if !inner.donut_mode {
            return Err(MoveError::DonutModeInactive);
        }
        let employee = inner
            .employees
            .get_mut(&employee_id)
            .ok_or(MoveError::EmployeeNotFound(employee_id))?;
        if !DonutModeGate::visible_in(true, employee) {
            return Err(MoveError::OutsideDonutScope {
                employee_id,
                grid_position: employee.grid_position,
            });
        }

        let from = employee.current_position(true);
        if to == employee.grid_position {
            // Back on the permanent box: the what-if is withdrawn.
            employee.donut_position = None;
            employee.donut_modified = false;
        } else {
            employee.donut_position = Some(to);
            employee.donut_modified = true;
        }

        if from != to {
            inner.record(employee_id, MoveKind::Overlay, from, to);
        }
        Ok(())
    }

    fn select_employee(&self, employee_id: EmployeeId) {
        self.lock().selected = Some(employee_id);
    }
}
